//! Period resolution: free-text time references to concrete date ranges.

pub mod error;
pub mod resolver;
pub mod types;


pub use error::PeriodError;
pub use resolver::{PeriodResolver, month_bounds};
pub use types::{DateRange, PeriodKind, ResolvedPeriod};
