//! Persistence seam for the budget ledger.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use voxledger_shared::LimitPolicy;
use voxledger_shared::types::{Category, PageRequest, UserId};

use super::error::LedgerError;
use super::types::{BudgetLimit, RecordedExpense};
use crate::expense::{Expense, NewExpense};

/// Storage operations the ledger needs.
///
/// This trait is implemented by the db crate to provide actual database operations.
/// Every failure surfaces as `LedgerError::Storage`.
pub trait LedgerStore: Send + Sync {
    /// Point lookup of a limit row.
    fn get_limit(
        &self,
        user_id: UserId,
        category: Category,
    ) -> impl std::future::Future<Output = Result<Option<BudgetLimit>, LedgerError>> + Send;

    /// All limit rows of a user.
    fn list_limits(
        &self,
        user_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<BudgetLimit>, LedgerError>> + Send;

    /// Inserts the limit or updates the existing row for (user, category).
    fn upsert_limit(
        &self,
        user_id: UserId,
        category: Category,
        limit_amount: Decimal,
    ) -> impl std::future::Future<Output = Result<BudgetLimit, LedgerError>> + Send;

    /// Sum of amounts with `start <= created_at < end`. Zero when there are none.
    fn month_total(
        &self,
        user_id: UserId,
        category: Category,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl std::future::Future<Output = Result<Decimal, LedgerError>> + Send;

    /// Expenses with `start <= created_at <= end`, newest first.
    /// `category = None` means every category.
    fn expenses_between(
        &self,
        user_id: UserId,
        category: Option<Category>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl std::future::Future<Output = Result<Vec<Expense>, LedgerError>> + Send;

    /// One page of a user's expenses, newest first, with the total count.
    fn list_expenses(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> impl std::future::Future<Output = Result<(Vec<Expense>, u64), LedgerError>> + Send;

    /// Atomically reads the limit and the total for `[month_start, month_end)`,
    /// evaluates the expense against them and appends it.
    ///
    /// Under `LimitPolicy::Hard` an over-limit expense is refused with
    /// `LedgerError::LimitExceeded` and nothing is written.
    fn record_expense(
        &self,
        expense: NewExpense,
        month_start: NaiveDateTime,
        month_end: NaiveDateTime,
        policy: LimitPolicy,
    ) -> impl std::future::Future<Output = Result<RecordedExpense, LedgerError>> + Send;
}
