//! The module contains the error the engine can throw.
//!
//! The settlement operations themselves are total and never fail; the only
//! error source is the strict validation path used by callers before they
//! persist an expense.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
}
