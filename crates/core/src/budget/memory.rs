//! In-memory ledger store.
//!
//! Backs unit tests and the API test harness. A single mutex guards all
//! state, so `record_expense` is atomic like the SQL store's transaction.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use voxledger_shared::LimitPolicy;
use voxledger_shared::types::{BudgetLimitId, Category, ExpenseId, PageRequest, UserId};

use super::error::LedgerError;
use super::service::BudgetService;
use super::store::LedgerStore;
use super::types::{BudgetLimit, RecordedExpense};
use crate::expense::{Expense, NewExpense};

#[derive(Debug, Default)]
struct Inner {
    next_limit_id: i64,
    next_expense_id: i64,
    limits: BTreeMap<(UserId, Category), BudgetLimit>,
    expenses: Vec<Expense>,
}

impl Inner {
    fn total(
        &self,
        user_id: UserId,
        category: Category,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Decimal {
        self.expenses
            .iter()
            .filter(|e| {
                e.user_id == user_id
                    && e.category == category
                    && e.created_at >= start
                    && e.created_at < end
            })
            .map(|e| e.amount)
            .sum()
    }

    fn push(&mut self, expense: NewExpense) -> Expense {
        self.next_expense_id += 1;
        let stored = Expense {
            id: ExpenseId::new(self.next_expense_id),
            user_id: expense.user_id,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
            original_text: expense.original_text,
            created_at: expense.created_at,
        };
        self.expenses.push(stored.clone());
        stored
    }

    fn newest_first(mut expenses: Vec<Expense>) -> Vec<Expense> {
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        expenses
    }
}

/// Ledger store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: Mutex<Inner>,
    unavailable: AtomicBool,
}

impl InMemoryLedgerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `LedgerError::Storage` while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Appends an expense with an explicit timestamp, bypassing limit checks.
    pub fn insert_expense(&self, expense: NewExpense) -> Expense {
        self.lock().push(expense)
    }

    /// Number of stored expenses.
    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.lock().expenses.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn guard(&self) -> Result<MutexGuard<'_, Inner>, LedgerError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::Storage("store unavailable".to_string()));
        }
        Ok(self.lock())
    }
}

impl LedgerStore for InMemoryLedgerStore {
    async fn get_limit(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Option<BudgetLimit>, LedgerError> {
        Ok(self.guard()?.limits.get(&(user_id, category)).cloned())
    }

    async fn list_limits(&self, user_id: UserId) -> Result<Vec<BudgetLimit>, LedgerError> {
        Ok(self
            .guard()?
            .limits
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_limit(
        &self,
        user_id: UserId,
        category: Category,
        limit_amount: Decimal,
    ) -> Result<BudgetLimit, LedgerError> {
        let mut inner = self.guard()?;
        if let Some(existing) = inner.limits.get_mut(&(user_id, category)) {
            existing.limit_amount = limit_amount;
            return Ok(existing.clone());
        }

        inner.next_limit_id += 1;
        let limit = BudgetLimit {
            id: BudgetLimitId::new(inner.next_limit_id),
            user_id,
            category,
            limit_amount,
        };
        inner.limits.insert((user_id, category), limit.clone());
        Ok(limit)
    }

    async fn month_total(
        &self,
        user_id: UserId,
        category: Category,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal, LedgerError> {
        Ok(self.guard()?.total(user_id, category, start, end))
    }

    async fn expenses_between(
        &self,
        user_id: UserId,
        category: Option<Category>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>, LedgerError> {
        let inner = self.guard()?;
        let matching = inner
            .expenses
            .iter()
            .filter(|e| {
                e.user_id == user_id
                    && category.is_none_or(|c| e.category == c)
                    && e.created_at >= start
                    && e.created_at <= end
            })
            .cloned()
            .collect();
        Ok(Inner::newest_first(matching))
    }

    async fn list_expenses(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, u64), LedgerError> {
        let inner = self.guard()?;
        let all = Inner::newest_first(
            inner
                .expenses
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect(),
        );
        let total = u64::try_from(all.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok((all.into_iter().skip(offset).take(limit).collect(), total))
    }

    async fn record_expense(
        &self,
        expense: NewExpense,
        month_start: NaiveDateTime,
        month_end: NaiveDateTime,
        policy: LimitPolicy,
    ) -> Result<RecordedExpense, LedgerError> {
        let mut inner = self.guard()?;

        let limit = inner
            .limits
            .get(&(expense.user_id, expense.category))
            .map(|l| l.limit_amount);
        let current = inner.total(expense.user_id, expense.category, month_start, month_end);
        let check = BudgetService::evaluate(limit, current, expense.amount)?;

        if let (LimitPolicy::Hard, true, Some(limit)) = (policy, check.over_limit, limit) {
            return Err(LedgerError::LimitExceeded {
                category: expense.category,
                limit,
                amount: expense.amount,
                new_total: current + expense.amount,
            });
        }

        Ok(RecordedExpense {
            expense: inner.push(expense),
            check,
        })
    }
}
