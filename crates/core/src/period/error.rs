//! Period error types.

use thiserror::Error;

/// Period-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The year/month pair does not name a calendar month.
    #[error("Invalid calendar month: {year}-{month:02}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month (1-12).
        month: u32,
    },
}
