//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voxledger_shared::types::Category;

use crate::budget::LimitStatus;
use crate::expense::Expense;
use crate::period::ResolvedPeriod;

/// Spending of one category within a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// Category.
    pub category: Category,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of expenses.
    pub count: usize,
    /// Share of the period total, percent with two decimals.
    pub share_percent: Decimal,
}

/// Totals per category over a period. Categories without spending are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Reported period.
    pub period: ResolvedPeriod,
    /// Lines in category order.
    pub lines: Vec<SummaryLine>,
    /// Sum over every category.
    pub total: Decimal,
}

/// Detail of one category over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    /// Reported period.
    pub period: ResolvedPeriod,
    /// Category.
    pub category: Category,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of expenses.
    pub count: usize,
    /// Mean amount, two decimals. `None` without expenses.
    pub average: Option<Decimal>,
    /// Remaining budget this month. `None` when no limit is set.
    pub remaining: Option<Decimal>,
    /// Up to five most recent expenses, newest first.
    pub recent: Vec<Expense>,
}

/// Budget state of every category for the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitReport {
    /// One status per category, in category order.
    pub statuses: Vec<LimitStatus>,
}

/// Any analytics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalyticsReport {
    /// Totals per category.
    Summary(SummaryReport),
    /// One category in detail.
    Category(CategoryReport),
    /// Budget limits.
    Limit(LimitReport),
}
