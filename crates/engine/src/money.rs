//! Floating-point money helpers.
//!
//! Amounts are IEEE-754 doubles, inherited from the ledger the engine
//! consumes. Accumulated drift is expected; anything within [`EPSILON`] of
//! zero is treated as settled so the matcher never emits noise transfers.

/// Signed monetary amount. Positive = owed to the participant, negative =
/// the participant owes.
pub type Money = f64;

/// Tolerance under which a residual amount counts as zero.
pub const EPSILON: Money = 1e-9;

/// Returns `true` if the amount is within tolerance of zero.
#[must_use]
pub fn is_negligible(amount: Money) -> bool {
    amount.abs() <= EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negligible_straddles_epsilon() {
        assert!(is_negligible(0.0));
        assert!(is_negligible(-0.0));
        assert!(is_negligible(EPSILON));
        assert!(is_negligible(-EPSILON / 2.0));
        assert!(!is_negligible(EPSILON * 10.0));
        assert!(!is_negligible(-0.01));
    }
}
