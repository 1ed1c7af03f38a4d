//! Collaborator seams for the settlement service.
//!
//! The engine does no I/O: expenses come from an [`ExpenseStore`] and
//! membership checks go through a [`GroupDirectory`]. The bundled
//! [`MemoryStore`] implements both behind a `RwLock`; a durable backend
//! would slot in behind the same traits.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use engine::{Expense, ParticipantId};
use uuid::Uuid;

use crate::ApiError;

#[derive(Clone, Debug)]
pub struct Member {
    pub email: ParticipantId,
    pub admin: bool,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: ParticipantId,
    pub members: Vec<Member>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Active members only.
    pub fn active_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.active)
    }

    fn find_active(&self, email: &ParticipantId) -> Option<&Member> {
        self.active_members().find(|m| m.email == *email)
    }
}

/// Read-only source of expense records keyed by group.
pub trait ExpenseStore: Send + Sync {
    fn expenses_for_group(&self, group_id: &str) -> Result<Vec<Expense>, ApiError>;

    /// Write side used by the ingestion plumbing. Returns the expense id.
    fn record_expense(&self, group_id: &str, expense: Expense) -> Result<String, ApiError>;
}

/// Resolves group membership and admin status for the caller.
pub trait GroupDirectory: Send + Sync {
    fn create_group(
        &self,
        creator: &ParticipantId,
        name: &str,
        description: Option<&str>,
        members: &[ParticipantId],
    ) -> Result<Group, ApiError>;

    /// Returns the group if it exists and is not deleted.
    fn group(&self, group_id: &str) -> Result<Group, ApiError>;

    /// Renames or re-describes the group.
    fn update_group(
        &self,
        group_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), ApiError>;

    /// Soft-deletes the group; subsequent reads see it as gone while the
    /// ledger rows stay in place.
    fn delete_group(&self, group_id: &str) -> Result<(), ApiError>;

    /// Non-deleted groups the email is an active member of.
    fn groups_for_member(&self, email: &ParticipantId) -> Result<Vec<Group>, ApiError>;

    fn require_active_member(
        &self,
        group_id: &str,
        email: &ParticipantId,
    ) -> Result<(), ApiError>;

    fn require_admin(&self, group_id: &str, email: &ParticipantId) -> Result<(), ApiError>;

    /// Adds a new member or reactivates a previously removed one.
    fn upsert_member(
        &self,
        group_id: &str,
        email: &ParticipantId,
        admin: bool,
    ) -> Result<(), ApiError>;

    /// Deactivates a member; their past expenses stay in the ledger.
    fn remove_member(&self, group_id: &str, email: &ParticipantId) -> Result<(), ApiError>;
}

#[derive(Debug, Default)]
struct Inner {
    groups: HashMap<String, Group>,
    expenses: HashMap<String, Vec<(String, Expense)>>,
}

/// In-memory store, the only backend this service ships with.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_group(inner: &Inner, group_id: &str) -> Result<Group, ApiError> {
        inner
            .groups
            .get(group_id)
            .filter(|g| !g.deleted)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("group not exists".to_string()))
    }

    fn with_inner<T>(&self, f: impl FnOnce(&Inner) -> Result<T, ApiError>) -> Result<T, ApiError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApiError::Generic("store poisoned".to_string()))?;
        f(&inner)
    }

    fn with_inner_mut<T>(
        &self,
        f: impl FnOnce(&mut Inner) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApiError::Generic("store poisoned".to_string()))?;
        f(&mut inner)
    }
}

impl ExpenseStore for MemoryStore {
    fn expenses_for_group(&self, group_id: &str) -> Result<Vec<Expense>, ApiError> {
        self.with_inner(|inner| {
            Self::read_group(inner, group_id)?;
            Ok(inner
                .expenses
                .get(group_id)
                .map(|records| records.iter().map(|(_, e)| e.clone()).collect())
                .unwrap_or_default())
        })
    }

    fn record_expense(&self, group_id: &str, expense: Expense) -> Result<String, ApiError> {
        self.with_inner_mut(|inner| {
            Self::read_group(inner, group_id)?;
            let id = Uuid::new_v4().to_string();
            inner
                .expenses
                .entry(group_id.to_string())
                .or_default()
                .push((id.clone(), expense));
            Ok(id)
        })
    }
}

impl GroupDirectory for MemoryStore {
    fn create_group(
        &self,
        creator: &ParticipantId,
        name: &str,
        description: Option<&str>,
        members: &[ParticipantId],
    ) -> Result<Group, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Generic("group name must not be empty".to_string()));
        }

        let mut emails: Vec<ParticipantId> = members.to_vec();
        if !emails.contains(creator) {
            emails.push(creator.clone());
        }
        emails.sort();
        emails.dedup();

        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(ToString::to_string),
            created_by: creator.clone(),
            members: emails
                .into_iter()
                .map(|email| {
                    let admin = email == *creator;
                    Member {
                        email,
                        admin,
                        active: true,
                    }
                })
                .collect(),
            deleted: false,
            created_at: now,
            updated_at: now,
        };

        self.with_inner_mut(|inner| {
            inner.groups.insert(group.id.clone(), group.clone());
            Ok(group)
        })
    }

    fn group(&self, group_id: &str) -> Result<Group, ApiError> {
        self.with_inner(|inner| Self::read_group(inner, group_id))
    }

    fn update_group(
        &self,
        group_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Generic("group name must not be empty".to_string()));
        }

        self.with_inner_mut(|inner| {
            let group = inner
                .groups
                .get_mut(group_id)
                .filter(|g| !g.deleted)
                .ok_or_else(|| ApiError::NotFound("group not exists".to_string()))?;

            group.name = name.to_string();
            group.description = description.map(ToString::to_string);
            group.updated_at = Utc::now();
            Ok(())
        })
    }

    fn delete_group(&self, group_id: &str) -> Result<(), ApiError> {
        self.with_inner_mut(|inner| {
            let group = inner
                .groups
                .get_mut(group_id)
                .filter(|g| !g.deleted)
                .ok_or_else(|| ApiError::NotFound("group not exists".to_string()))?;

            group.deleted = true;
            group.updated_at = Utc::now();
            Ok(())
        })
    }

    fn groups_for_member(&self, email: &ParticipantId) -> Result<Vec<Group>, ApiError> {
        self.with_inner(|inner| {
            let mut groups: Vec<Group> = inner
                .groups
                .values()
                .filter(|g| !g.deleted && g.find_active(email).is_some())
                .cloned()
                .collect();
            groups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(groups)
        })
    }

    fn require_active_member(
        &self,
        group_id: &str,
        email: &ParticipantId,
    ) -> Result<(), ApiError> {
        let group = self.group(group_id)?;
        if group.find_active(email).is_none() {
            return Err(ApiError::Forbidden(format!(
                "{email} is not an active member"
            )));
        }
        Ok(())
    }

    fn require_admin(&self, group_id: &str, email: &ParticipantId) -> Result<(), ApiError> {
        let group = self.group(group_id)?;
        match group.find_active(email) {
            Some(member) if member.admin => Ok(()),
            Some(_) => Err(ApiError::Forbidden(format!("{email} is not an admin"))),
            None => Err(ApiError::Forbidden(format!(
                "{email} is not an active member"
            ))),
        }
    }

    fn upsert_member(
        &self,
        group_id: &str,
        email: &ParticipantId,
        admin: bool,
    ) -> Result<(), ApiError> {
        self.with_inner_mut(|inner| {
            let group = inner
                .groups
                .get_mut(group_id)
                .filter(|g| !g.deleted)
                .ok_or_else(|| ApiError::NotFound("group not exists".to_string()))?;

            if let Some(member) = group.members.iter_mut().find(|m| m.email == *email) {
                if member.active {
                    return Err(ApiError::Conflict("member already exists".to_string()));
                }
                member.active = true;
                member.admin = admin;
            } else {
                group.members.push(Member {
                    email: email.clone(),
                    admin,
                    active: true,
                });
            }
            group.updated_at = Utc::now();
            Ok(())
        })
    }

    fn remove_member(&self, group_id: &str, email: &ParticipantId) -> Result<(), ApiError> {
        self.with_inner_mut(|inner| {
            let group = inner
                .groups
                .get_mut(group_id)
                .filter(|g| !g.deleted)
                .ok_or_else(|| ApiError::NotFound("group not exists".to_string()))?;

            let member = group
                .members
                .iter_mut()
                .find(|m| m.email == *email && m.active)
                .ok_or_else(|| {
                    ApiError::NotFound(format!("{email} is not an active member"))
                })?;
            member.active = false;
            group.updated_at = Utc::now();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use engine::Split;

    use super::*;

    fn id(email: &str) -> ParticipantId {
        email.into()
    }

    fn store_with_group() -> (MemoryStore, String) {
        let store = MemoryStore::new();
        let group = store
            .create_group(&id("alice@x.it"), "Trip", None, &[id("bob@x.it")])
            .unwrap();
        let group_id = group.id;
        (store, group_id)
    }

    #[test]
    fn creator_becomes_admin_member() {
        let (store, group_id) = store_with_group();

        store.require_admin(&group_id, &id("alice@x.it")).unwrap();
        store
            .require_active_member(&group_id, &id("bob@x.it"))
            .unwrap();
        assert!(store.require_admin(&group_id, &id("bob@x.it")).is_err());
    }

    #[test]
    fn unknown_group_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.group("nope"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            store.expenses_for_group("nope"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn upsert_rejects_duplicate_active_member() {
        let (store, group_id) = store_with_group();
        assert!(matches!(
            store.upsert_member(&group_id, &id("bob@x.it"), false),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn removed_member_can_be_reactivated_as_admin() {
        let (store, group_id) = store_with_group();

        store.remove_member(&group_id, &id("bob@x.it")).unwrap();
        assert!(
            store
                .require_active_member(&group_id, &id("bob@x.it"))
                .is_err()
        );

        store
            .upsert_member(&group_id, &id("bob@x.it"), true)
            .unwrap();
        store.require_admin(&group_id, &id("bob@x.it")).unwrap();
    }

    #[test]
    fn expenses_round_trip_in_insertion_order() {
        let (store, group_id) = store_with_group();

        for amount in [10.0, 20.0] {
            store
                .record_expense(
                    &group_id,
                    Expense {
                        payer: id("alice@x.it"),
                        total_amount: amount,
                        splits: vec![Split {
                            debtor: id("bob@x.it"),
                            amount_owed: amount,
                        }],
                        occurred_at: Utc::now(),
                    },
                )
                .unwrap();
        }

        let expenses = store.expenses_for_group(&group_id).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].total_amount, 10.0);
        assert_eq!(expenses[1].total_amount, 20.0);
    }

    #[test]
    fn deleted_group_disappears_from_reads() {
        let (store, group_id) = store_with_group();

        store.delete_group(&group_id).unwrap();

        assert!(matches!(store.group(&group_id), Err(ApiError::NotFound(_))));
        assert!(matches!(
            store.expenses_for_group(&group_id),
            Err(ApiError::NotFound(_))
        ));
        assert!(
            store
                .groups_for_member(&id("alice@x.it"))
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            store.delete_group(&group_id),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn update_rewrites_name_and_description() {
        let (store, group_id) = store_with_group();

        store
            .update_group(&group_id, "Road trip", Some("Summer 2026"))
            .unwrap();

        let group = store.group(&group_id).unwrap();
        assert_eq!(group.name, "Road trip");
        assert_eq!(group.description.as_deref(), Some("Summer 2026"));

        assert!(matches!(
            store.update_group(&group_id, "  ", None),
            Err(ApiError::Generic(_))
        ));
    }

    #[test]
    fn membership_listing_skips_inactive() {
        let (store, group_id) = store_with_group();
        store.remove_member(&group_id, &id("bob@x.it")).unwrap();

        assert!(store.groups_for_member(&id("bob@x.it")).unwrap().is_empty());
        assert_eq!(
            store
                .groups_for_member(&id("alice@x.it"))
                .unwrap()
                .len(),
            1
        );
    }
}
