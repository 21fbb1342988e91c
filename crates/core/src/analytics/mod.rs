//! Spending reports built from ledger queries and resolved periods.

pub mod format;
pub mod service;
pub mod types;

pub use format::ReportFormatter;
pub use service::AnalyticsService;
pub use types::{AnalyticsReport, CategoryReport, LimitReport, SummaryLine, SummaryReport};
