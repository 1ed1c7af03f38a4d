//! Expense ingestion: the write side that feeds the settlement core.

use api_types::expense::{ExpenseCreated, ExpenseNew};
use axum::{Extension, Json, extract::Path, extract::State};
use chrono::Utc;
use engine::{Expense, ParticipantId, Split};

use crate::{ApiError, server::CurrentUser, server::ServerState};

pub async fn create(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<ExpenseCreated>, ApiError> {
    state.directory.require_active_member(&group_id, &caller)?;

    let group = state.directory.group(&group_id)?;
    let is_active = |email: &ParticipantId| group.active_members().any(|m| m.email == *email);

    let payer = ParticipantId::from(payload.paid_by.as_str());
    if !is_active(&payer) {
        return Err(ApiError::Generic(format!(
            "payer {payer} is not a member of the group"
        )));
    }

    let splits: Vec<Split> = payload
        .shares
        .iter()
        .map(|share| Split {
            debtor: ParticipantId::from(share.owed_by.as_str()),
            amount_owed: share.amount_owed,
        })
        .collect();
    for split in &splits {
        if !is_active(&split.debtor) {
            return Err(ApiError::Generic(format!(
                "{} is not a member of the group",
                split.debtor
            )));
        }
    }

    let expense = Expense {
        payer,
        total_amount: payload.total_amount,
        splits,
        occurred_at: payload
            .occurred_at
            .map_or_else(Utc::now, |ts| ts.with_timezone(&Utc)),
    };
    expense.validate()?;

    let id = state.expenses.record_expense(&group_id, expense.clone())?;
    tracing::info!(%group_id, expense_id = %id, "expense recorded");

    for split in &expense.splits {
        if split.amount_owed > 0.0 {
            state
                .notifier
                .expense_added(&split.debtor, split.amount_owed, &group.name);
        }
    }

    Ok(Json(ExpenseCreated { id }))
}
