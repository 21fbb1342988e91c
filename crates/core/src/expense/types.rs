//! Expense data types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voxledger_shared::types::{Category, ExpenseId, UserId};

/// A recorded expense. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owner.
    pub user_id: UserId,
    /// Expense category.
    pub category: Category,
    /// Amount in currency units, always positive.
    pub amount: Decimal,
    /// Short description.
    pub description: String,
    /// The message the expense was extracted from.
    pub original_text: String,
    /// Local timestamp of recording.
    pub created_at: NaiveDateTime,
}

/// Input for appending an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Owner.
    pub user_id: UserId,
    /// Expense category.
    pub category: Category,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Short description.
    pub description: String,
    /// The message the expense was extracted from.
    pub original_text: String,
    /// Local timestamp of recording.
    pub created_at: NaiveDateTime,
}
