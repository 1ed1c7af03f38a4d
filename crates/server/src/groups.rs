//! Group and membership plumbing endpoints.

use api_types::expense::{ExpenseView, ShareView};
use api_types::group::{GroupCreated, GroupDetail, GroupNew, GroupUpdate, MemberUpsert, MemberView};
use axum::{Extension, Json, extract::Path, extract::State};
use engine::ParticipantId;

use crate::{ApiError, server::CurrentUser, server::ServerState};

pub async fn create(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<Json<GroupCreated>, ApiError> {
    let members: Vec<ParticipantId> = payload
        .members
        .iter()
        .map(|email| ParticipantId::from(email.as_str()))
        .collect();

    let group = state.directory.create_group(
        &caller,
        &payload.name,
        payload.description.as_deref(),
        &members,
    )?;
    tracing::info!(group_id = %group.id, name = %group.name, "group created");

    for member in group.active_members() {
        if member.email != caller {
            state
                .notifier
                .group_created(&member.email, &group.name, &caller);
        }
    }

    Ok(Json(GroupCreated {
        id: group.id.clone(),
        name: group.name.clone(),
        members: group
            .active_members()
            .map(|m| MemberView {
                email: m.email.to_string(),
                admin: m.admin,
            })
            .collect(),
    }))
}

pub async fn detail(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupDetail>, ApiError> {
    state.directory.require_active_member(&group_id, &caller)?;

    let group = state.directory.group(&group_id)?;
    let expenses = state.expenses.expenses_for_group(&group_id)?;

    Ok(Json(GroupDetail {
        id: group.id.clone(),
        name: group.name.clone(),
        description: group.description.clone(),
        members: group
            .active_members()
            .map(|m| MemberView {
                email: m.email.to_string(),
                admin: m.admin,
            })
            .collect(),
        expenses: expenses
            .into_iter()
            .map(|e| ExpenseView {
                paid_by: e.payer.to_string(),
                total_amount: e.total_amount,
                shares: e
                    .splits
                    .iter()
                    .map(|s| ShareView {
                        owed_by: s.debtor.to_string(),
                        amount_owed: s.amount_owed,
                    })
                    .collect(),
                occurred_at: e.occurred_at.fixed_offset(),
            })
            .collect(),
    }))
}

pub async fn update(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<GroupUpdate>,
) -> Result<(), ApiError> {
    state.directory.require_admin(&group_id, &caller)?;

    state
        .directory
        .update_group(&group_id, &payload.name, payload.description.as_deref())?;
    tracing::info!(%group_id, name = %payload.name, "group updated");

    Ok(())
}

pub async fn delete(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<(), ApiError> {
    state.directory.require_admin(&group_id, &caller)?;

    state.directory.delete_group(&group_id)?;
    tracing::info!(%group_id, "group deleted");

    Ok(())
}

pub async fn upsert_member(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<MemberUpsert>,
) -> Result<Json<MemberView>, ApiError> {
    state.directory.require_admin(&group_id, &caller)?;

    let email = ParticipantId::from(payload.email.as_str());
    let admin = payload.admin.unwrap_or(false);
    state.directory.upsert_member(&group_id, &email, admin)?;

    let group = state.directory.group(&group_id)?;
    tracing::info!(%group_id, member = %email, "member added");
    state.notifier.member_added(&email, &group.name, &caller);

    Ok(Json(MemberView {
        email: email.to_string(),
        admin,
    }))
}

pub async fn remove_member(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path((group_id, email)): Path<(String, String)>,
) -> Result<(), ApiError> {
    state.directory.require_admin(&group_id, &caller)?;

    let email = ParticipantId::from(email.as_str());
    state.directory.remove_member(&group_id, &email)?;
    tracing::info!(%group_id, member = %email, "member removed");

    Ok(())
}
