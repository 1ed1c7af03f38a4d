//! Settlement read endpoints: the thin callers into the engine.

use api_types::settlement::{
    BalanceView, BalancesResponse, GroupSummary, SettlementResponse, SummaryResponse,
    TransferView, TransfersResponse,
};
use axum::{Extension, Json, extract::Path, extract::State};
use engine::{Transfer, balance, settlement, transfer};

use crate::{ApiError, server::CurrentUser, server::ServerState};

fn transfer_views(transfers: &[Transfer]) -> Vec<TransferView> {
    transfers
        .iter()
        .map(|t| TransferView {
            from: t.from.to_string(),
            to: t.to.to_string(),
            amount: t.amount,
        })
        .collect()
}

/// Net balance per member, zero entries included.
pub async fn balances(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<BalancesResponse>, ApiError> {
    state.directory.require_active_member(&group_id, &caller)?;

    let expenses = state.expenses.expenses_for_group(&group_id)?;
    let mut balances: Vec<BalanceView> = balance::aggregate(&expenses)
        .into_iter()
        .map(|(id, amount)| BalanceView {
            email: id.to_string(),
            amount,
        })
        .collect();
    balances.sort_by(|a, b| a.email.cmp(&b.email));

    Ok(Json(BalancesResponse { balances }))
}

/// The full minimized transfer list for the group.
pub async fn transfers(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<TransfersResponse>, ApiError> {
    state.directory.require_active_member(&group_id, &caller)?;

    let expenses = state.expenses.expenses_for_group(&group_id)?;
    let all = transfer::minimize(&balance::aggregate(&expenses));

    Ok(Json(TransfersResponse {
        transfers: transfer_views(&all),
    }))
}

/// The caller's slice of the settlement plus their net position.
pub async fn settlement(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<SettlementResponse>, ApiError> {
    state.directory.require_active_member(&group_id, &caller)?;

    let expenses = state.expenses.expenses_for_group(&group_id)?;
    let view = settlement::for_user(&expenses, &caller);

    Ok(Json(SettlementResponse {
        transfers: transfer_views(&view.transfers),
        amount: view.amount,
    }))
}

/// The caller's settlement scalar in every group they belong to.
pub async fn summary(
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let groups = state.directory.groups_for_member(&caller)?;

    let mut summaries = Vec::with_capacity(groups.len());
    for group in groups {
        let expenses = state.expenses.expenses_for_group(&group.id)?;
        let view = settlement::for_user(&expenses, &caller);
        summaries.push(GroupSummary {
            group_id: group.id,
            name: group.name,
            settlement_amount: view.amount,
        });
    }

    let total_settlement_amount = summaries.iter().map(|g| g.settlement_amount).sum();
    Ok(Json(SummaryResponse {
        total_settlement_amount,
        groups: summaries,
    }))
}
