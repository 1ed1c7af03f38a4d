use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ParticipantId, ResultEngine};

/// One debtor's share of an expense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub debtor: ParticipantId,
    pub amount_owed: Money,
}

/// A single paid-and-split event within a group.
///
/// The sum of the split amounts should equal `total_amount`, but the engine
/// does not assume it: an expense where the payer covered more than anyone
/// owes simply leaves the payer with a larger net credit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub payer: ParticipantId,
    pub total_amount: Money,
    pub splits: Vec<Split>,
    pub occurred_at: DateTime<Utc>,
}

impl Expense {
    /// Strict validation for callers that persist expenses.
    ///
    /// The aggregation itself is total and tolerates anything; this is the
    /// gate the service layer applies before a record enters the ledger.
    pub fn validate(&self) -> ResultEngine<()> {
        if self.payer.is_blank() {
            return Err(EngineError::InvalidExpense(
                "payer must not be empty".to_string(),
            ));
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(EngineError::InvalidExpense(
                "total amount must be a non-negative number".to_string(),
            ));
        }
        for split in &self.splits {
            if split.debtor.is_blank() {
                return Err(EngineError::InvalidExpense(
                    "split debtor must not be empty".to_string(),
                ));
            }
            if !split.amount_owed.is_finite() || split.amount_owed < 0.0 {
                return Err(EngineError::InvalidExpense(format!(
                    "split amount for {} must be a non-negative number",
                    split.debtor
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(payer: &str, total: f64, splits: &[(&str, f64)]) -> Expense {
        Expense {
            payer: payer.into(),
            total_amount: total,
            splits: splits
                .iter()
                .map(|(debtor, amount)| Split {
                    debtor: (*debtor).into(),
                    amount_owed: *amount,
                })
                .collect(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn validate_accepts_well_formed_expense() {
        let e = expense("a@x.it", 30.0, &[("a@x.it", 15.0), ("b@x.it", 15.0)]);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_payer() {
        let e = expense("  ", 10.0, &[("b@x.it", 10.0)]);
        assert!(matches!(e.validate(), Err(EngineError::InvalidExpense(_))));
    }

    #[test]
    fn validate_rejects_negative_amounts() {
        let e = expense("a@x.it", -1.0, &[]);
        assert!(e.validate().is_err());

        let e = expense("a@x.it", 10.0, &[("b@x.it", -5.0)]);
        assert!(e.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_amounts() {
        let e = expense("a@x.it", f64::NAN, &[]);
        assert!(e.validate().is_err());

        let e = expense("a@x.it", 10.0, &[("b@x.it", f64::INFINITY)]);
        assert!(e.validate().is_err());
    }

    #[test]
    fn validate_tolerates_split_sum_mismatch() {
        // The payer covering more than anyone owes is accepted as-is.
        let e = expense("a@x.it", 100.0, &[("b@x.it", 30.0)]);
        assert!(e.validate().is_ok());
    }
}
