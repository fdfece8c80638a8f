use thiserror::Error;

use crate::core::activity::ActivityType;
use crate::core::transaction::Amount;

/// Rejected user input. The ledger is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Amount missing, not a finite number, or not strictly positive.
    #[error("invalid amount")]
    InvalidAmount,
    /// Beneficiary is empty once whitespace is trimmed.
    #[error("missing beneficiary")]
    MissingBeneficiary,
    /// Activity outside the revenue-share table.
    #[error("unknown activity type: {0}")]
    UnknownActivity(String),
    /// No transaction id is left to hand out.
    #[error("transaction ids exhausted")]
    IdsExhausted
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Occurs when a configured revenue split is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareTableError {
    #[error("split for {activity} must sum to 100, got {total}")]
    BadTotal {
        activity: ActivityType,
        total: Amount
    },
    #[error("split for {activity} has a negative or non-finite percentage")]
    InvalidPercentage {
        activity: ActivityType
    }
}
