//! Pure settlement core for group expense splitting.
//!
//! Data flows linearly through three stages:
//!
//! 1. [`balance::aggregate`] folds expenses into per-participant net
//!    balances.
//! 2. [`transfer::minimize`] turns the balances into an ordered list of
//!    person-to-person transfers using a greedy largest-creditor /
//!    largest-debtor match.
//! 3. [`settlement`] projects the transfer list onto one participant.
//!
//! Every stage is a pure function over its inputs: no storage, no I/O, no
//! shared state between calls. Callers are expected to gate access and feed
//! pre-validated expenses; see [`Expense::validate`] for the strict path.

pub use error::EngineError;
pub use expense::{Expense, Split};
pub use money::Money;
pub use participant::ParticipantId;
pub use settlement::UserSettlement;
pub use transfer::Transfer;

pub mod balance;
mod error;
mod expense;
pub mod money;
mod participant;
pub mod settlement;
pub mod transfer;

pub use balance::NetBalances;

type ResultEngine<T> = Result<T, EngineError>;
