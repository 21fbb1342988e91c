//! Budget ledger data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voxledger_shared::types::{BudgetLimitId, Category, UserId};

use crate::expense::Expense;

/// A configured monthly limit. At most one per (user, category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    /// Limit ID.
    pub id: BudgetLimitId,
    /// Owner.
    pub user_id: UserId,
    /// Limited category.
    pub category: Category,
    /// Monthly limit, always positive.
    pub limit_amount: Decimal,
}

/// Result of checking a candidate amount against a category's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    /// True when month-to-date total plus candidate exceeds the limit.
    pub over_limit: bool,
    /// `limit - (total + candidate)`, negative when over. `None` when no limit is set.
    pub remaining: Option<Decimal>,
    /// The limit checked against, if any.
    pub limit: Option<Decimal>,
}

impl LimitCheck {
    /// The "no limit configured" result: never over, nothing remaining.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self {
            over_limit: false,
            remaining: None,
            limit: None,
        }
    }
}

/// Traffic-light classification of how much budget is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetIndicator {
    /// Nothing left (remaining <= 0).
    Exhausted,
    /// Under 20% left.
    Critical,
    /// Under 50% left.
    Low,
    /// Under 80% left.
    Moderate,
    /// 80% or more left.
    Healthy,
    /// No limit configured.
    NotSet,
}

impl BudgetIndicator {
    /// Chat symbol for the indicator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Exhausted => "❌",
            Self::Critical => "🔴",
            Self::Low => "🟠",
            Self::Moderate => "🟡",
            Self::Healthy => "✅",
            Self::NotSet => "⚪",
        }
    }
}

/// Budget state of one category for the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitStatus {
    /// Category.
    pub category: Category,
    /// Configured limit, `None` when not set.
    pub limit: Option<Decimal>,
    /// Month-to-date spend.
    pub spent: Decimal,
    /// `limit - spent`, `None` when no limit is set.
    pub remaining: Option<Decimal>,
    /// `remaining / limit * 100`, two decimals. `None` when no limit is set.
    pub remaining_percent: Option<Decimal>,
    /// Classification of the remaining share.
    pub indicator: BudgetIndicator,
}

/// A stored expense together with the limit check made when it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedExpense {
    /// The stored expense.
    pub expense: Expense,
    /// Limit state after the expense.
    pub check: LimitCheck,
}
