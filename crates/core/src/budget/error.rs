//! Budget ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use voxledger_shared::AppError;
use voxledger_shared::types::{Category, MAX_AMOUNT};

use crate::period::PeriodError;

/// Budget-ledger errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The persistence store failed. Never retried.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Expense amount is not positive or above `MAX_AMOUNT`.
    #[error("Amount must be greater than zero and at most {max}, got {0}", max = MAX_AMOUNT)]
    InvalidAmount(Decimal),

    /// Budget limit is not positive or above `MAX_AMOUNT`.
    #[error("Budget limit must be greater than zero and at most {max}, got {0}", max = MAX_AMOUNT)]
    InvalidLimit(Decimal),

    /// Month outside the calendar.
    #[error(transparent)]
    InvalidMonth(#[from] PeriodError),

    /// Hard policy refused an expense that would exceed the limit.
    #[error("Expense of {amount} would bring {category} to {new_total}, over the limit of {limit}")]
    LimitExceeded {
        /// Category of the refused expense.
        category: Category,
        /// Configured monthly limit.
        limit: Decimal,
        /// Refused amount.
        amount: Decimal,
        /// Month-to-date total including the refused amount.
        new_total: Decimal,
    },
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Storage(msg) => Self::Storage(msg),
            LedgerError::InvalidAmount(_)
            | LedgerError::InvalidLimit(_)
            | LedgerError::InvalidMonth(_) => Self::Validation(err.to_string()),
            LedgerError::LimitExceeded { .. } => Self::LimitExceeded(err.to_string()),
        }
    }
}
