//! Greedy transfer minimization over net balances.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::{Money, NetBalances, ParticipantId, money};

/// A one-directional payment that reduces both parties' outstanding
/// magnitudes. Always `amount > 0` and `from != to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// One side of the match: a participant with an outstanding magnitude.
///
/// Max-heap ordering is by amount, with the lexicographically smaller id
/// winning ties so the emitted transfer list is deterministic.
#[derive(Debug)]
struct Outstanding {
    amount: Money,
    id: ParticipantId,
}

impl Ord for Outstanding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount
            .total_cmp(&other.amount)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Outstanding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Outstanding {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Outstanding {}

/// Emits an ordered list of transfers that clears every balance to zero
/// (within floating tolerance).
///
/// Greedy largest-creditor / largest-debtor match: repeatedly settle the
/// top of both heaps against each other and push back whichever side has a
/// remainder. Each round fully settles at least one participant, so the
/// loop runs at most once per non-zero entry and the whole pass is
/// `O(n log n)`.
///
/// This is a heuristic, not a minimum-cardinality solver (that problem is
/// NP-hard); it does guarantee at most `n - 1` transfers for `n` non-zero
/// balances. Residuals below [`money::EPSILON`], including whatever is left
/// on the non-empty side when the other runs out, are dropped silently.
#[must_use]
pub fn minimize(balances: &NetBalances) -> Vec<Transfer> {
    let mut creditors = BinaryHeap::new();
    let mut debtors = BinaryHeap::new();

    for (id, &balance) in balances {
        if money::is_negligible(balance) {
            continue;
        }
        let entry = Outstanding {
            amount: balance.abs(),
            id: id.clone(),
        };
        if balance > 0.0 {
            creditors.push(entry);
        } else {
            debtors.push(entry);
        }
    }

    let mut transfers = Vec::new();

    while let (Some(creditor), Some(debtor)) = (creditors.pop(), debtors.pop()) {
        let amount = creditor.amount.min(debtor.amount);

        transfers.push(Transfer {
            from: debtor.id.clone(),
            to: creditor.id.clone(),
            amount,
        });

        let creditor_rest = creditor.amount - amount;
        if !money::is_negligible(creditor_rest) {
            creditors.push(Outstanding {
                amount: creditor_rest,
                id: creditor.id,
            });
        }

        let debtor_rest = debtor.amount - amount;
        if !money::is_negligible(debtor_rest) {
            debtors.push(Outstanding {
                amount: debtor_rest,
                id: debtor.id,
            });
        }
    }

    transfers
}
