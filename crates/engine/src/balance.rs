//! Net balance aggregation over an expense ledger.

use std::collections::HashMap;

use crate::{Expense, Money, ParticipantId};

/// Signed net balance per participant.
///
/// Positive = the group owes them, negative = they owe the group. The
/// values sum to zero (within floating tolerance) whenever every expense's
/// splits add up to its total.
pub type NetBalances = HashMap<ParticipantId, Money>;

/// Folds a ledger into per-participant net balances.
///
/// Each expense credits the payer with its total and debits every split
/// debtor with the amount owed. A participant appearing both as payer and
/// debtor is a single key, so a self-split cancels out. Total function:
/// whatever the arithmetic produces is returned, zero entries included.
#[must_use]
pub fn aggregate(expenses: &[Expense]) -> NetBalances {
    let mut balances = NetBalances::new();

    for expense in expenses {
        *balances.entry(expense.payer.clone()).or_insert(0.0) += expense.total_amount;

        for split in &expense.splits {
            *balances.entry(split.debtor.clone()).or_insert(0.0) -= split.amount_owed;
        }
    }

    balances
}
