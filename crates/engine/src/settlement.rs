//! Per-participant projections over a transfer list.

use serde::{Deserialize, Serialize};

use crate::{Expense, Money, ParticipantId, Transfer, balance, transfer};

/// One participant's view of a settled ledger: the transfers touching them
/// and their net position.
///
/// `amount` is always the signed sum over `transfers`: positive means the
/// participant is net owed, negative means they owe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettlement {
    pub transfers: Vec<Transfer>,
    pub amount: Money,
}

/// Order-preserving sublist of transfers where the participant appears on
/// either side.
#[must_use]
pub fn transfers_for(transfers: &[Transfer], user: &ParticipantId) -> Vec<Transfer> {
    transfers
        .iter()
        .filter(|t| t.from == *user || t.to == *user)
        .cloned()
        .collect()
}

/// Signed settlement scalar for the participant over a transfer list.
#[must_use]
pub fn scalar_for(transfers: &[Transfer], user: &ParticipantId) -> Money {
    transfers.iter().fold(0.0, |acc, t| {
        if t.to == *user {
            acc + t.amount
        } else if t.from == *user {
            acc - t.amount
        } else {
            acc
        }
    })
}

/// Composed view: aggregate the ledger, minimize it, project onto `user`.
#[must_use]
pub fn for_user(expenses: &[Expense], user: &ParticipantId) -> UserSettlement {
    let balances = balance::aggregate(expenses);
    let all = transfer::minimize(&balances);
    let transfers = transfers_for(&all, user);
    let amount = scalar_for(&transfers, user);

    UserSettlement { transfers, amount }
}
