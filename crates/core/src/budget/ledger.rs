//! Budget ledger service.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use voxledger_shared::LimitPolicy;
use voxledger_shared::types::{
    Category, MAX_AMOUNT, PageRequest, PageResponse, UserId, is_storable_amount,
};

use super::error::LedgerError;
use super::service::BudgetService;
use super::store::LedgerStore;
use super::types::{BudgetLimit, LimitCheck, LimitStatus, RecordedExpense};
use crate::clock::Clock;
use crate::expense::{Expense, NewExpense, ValidExpense};
use crate::period::{ResolvedPeriod, month_bounds};

/// Tracks per-category monthly spend against configured limits.
///
/// "Current month" always means the calendar month of the clock's now,
/// never the month of an expense's own timestamp.
pub struct BudgetLedger<S: LedgerStore, C: Clock> {
    store: Arc<S>,
    clock: C,
    policy: LimitPolicy,
}

impl<S: LedgerStore, C: Clock + Clone> Clone for BudgetLedger<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: self.clock.clone(),
            policy: self.policy,
        }
    }
}

impl<S: LedgerStore, C: Clock> BudgetLedger<S, C> {
    /// Create a new ledger.
    #[must_use]
    pub fn new(store: Arc<S>, clock: C, policy: LimitPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// The over-limit policy in force.
    #[must_use]
    pub const fn policy(&self) -> LimitPolicy {
        self.policy
    }

    /// The clock's current time.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Returns the configured limit, or `None` when the category has none.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the store fails.
    pub async fn get_limit(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Option<Decimal>, LedgerError> {
        let limit = self.store.get_limit(user_id, category).await?;
        Ok(limit.map(|l| l.limit_amount))
    }

    /// Sums the category's expenses in the given calendar month.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidMonth` for an invalid month and
    /// `LedgerError::Storage` if the store fails.
    pub async fn month_to_date_total(
        &self,
        user_id: UserId,
        category: Category,
        year: i32,
        month: u32,
    ) -> Result<Decimal, LedgerError> {
        let (start, end) = month_bounds(year, month)?;
        self.store.month_total(user_id, category, start, end).await
    }

    /// Checks whether recording `candidate` would exceed the category's limit
    /// this month. Unconstrained when no limit is set.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` for a negative candidate or one
    /// above `MAX_AMOUNT`, and `LedgerError::Storage` if the store fails.
    pub async fn check(
        &self,
        user_id: UserId,
        category: Category,
        candidate: Decimal,
    ) -> Result<LimitCheck, LedgerError> {
        if candidate < Decimal::ZERO || candidate > MAX_AMOUNT {
            return Err(LedgerError::InvalidAmount(candidate));
        }

        let Some(limit) = self.get_limit(user_id, category).await? else {
            return Ok(LimitCheck::unconstrained());
        };

        let now = self.clock.now();
        let current = self
            .month_to_date_total(user_id, category, now.year(), now.month())
            .await?;

        BudgetService::evaluate(Some(limit), current, candidate)
    }

    /// Remaining budget of the category this month, `None` when no limit is set.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the store fails.
    pub async fn remaining_budget(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Option<Decimal>, LedgerError> {
        Ok(self.check(user_id, category, Decimal::ZERO).await?.remaining)
    }

    /// Sets the monthly limit of a category, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidLimit` unless the amount is positive and
    /// at most `MAX_AMOUNT`, and `LedgerError::Storage` if the store fails.
    pub async fn set_limit(
        &self,
        user_id: UserId,
        category: Category,
        limit_amount: Decimal,
    ) -> Result<BudgetLimit, LedgerError> {
        let limit_amount = limit_amount.round_dp(2);
        if !is_storable_amount(limit_amount) {
            return Err(LedgerError::InvalidLimit(limit_amount));
        }

        let limit = self.store.upsert_limit(user_id, category, limit_amount).await?;
        info!(user_id = %user_id, category = %category, limit = %limit_amount, "Budget limit set");
        Ok(limit)
    }

    /// Records a validated expense timestamped with the clock's now.
    ///
    /// Under the soft policy the expense is always stored and the returned
    /// check tells the caller whether to warn. Under the hard policy an
    /// over-limit expense is refused.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` unless the amount is positive and
    /// at most `MAX_AMOUNT`, `LedgerError::LimitExceeded` under the hard
    /// policy and `LedgerError::Storage` if the store fails.
    pub async fn record_expense(
        &self,
        user_id: UserId,
        expense: ValidExpense,
        original_text: String,
    ) -> Result<RecordedExpense, LedgerError> {
        if !is_storable_amount(expense.amount) {
            return Err(LedgerError::InvalidAmount(expense.amount));
        }

        let now = self.clock.now();
        let (month_start, month_end) = month_bounds(now.year(), now.month())?;

        let new_expense = NewExpense {
            user_id,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
            original_text,
            created_at: now,
        };

        let recorded = self
            .store
            .record_expense(new_expense, month_start, month_end, self.policy)
            .await?;

        if recorded.check.over_limit {
            warn!(
                user_id = %user_id,
                category = %recorded.expense.category,
                remaining = ?recorded.check.remaining,
                "Expense recorded over budget limit"
            );
        } else {
            info!(
                user_id = %user_id,
                category = %recorded.expense.category,
                amount = %recorded.expense.amount,
                "Expense recorded"
            );
        }

        Ok(recorded)
    }

    /// Budget state of every category for the current month, in category order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the store fails.
    pub async fn limit_statuses(&self, user_id: UserId) -> Result<Vec<LimitStatus>, LedgerError> {
        let limits: BTreeMap<Category, Decimal> = self
            .store
            .list_limits(user_id)
            .await?
            .into_iter()
            .map(|l| (l.category, l.limit_amount))
            .collect();

        let now = self.clock.now();
        let (start, end) = month_bounds(now.year(), now.month())?;

        let mut statuses = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let spent = self.store.month_total(user_id, category, start, end).await?;
            statuses.push(BudgetService::status(
                category,
                limits.get(&category).copied(),
                spent,
            ));
        }

        Ok(statuses)
    }

    /// Expenses inside a resolved period, newest first.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the store fails.
    pub async fn expenses_in_period(
        &self,
        user_id: UserId,
        category: Option<Category>,
        period: &ResolvedPeriod,
    ) -> Result<Vec<Expense>, LedgerError> {
        let now = self.clock.now();
        let expenses = self
            .store
            .expenses_between(
                user_id,
                category,
                period.range.start,
                period.range.effective_end(now),
            )
            .await?;

        debug!(
            user_id = %user_id,
            period = %period,
            count = expenses.len(),
            "Loaded expenses for period"
        );
        Ok(expenses)
    }

    /// One page of the user's expenses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Storage` if the store fails.
    pub async fn list_expenses(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<PageResponse<Expense>, LedgerError> {
        let (items, total) = self.store.list_expenses(user_id, page).await?;
        let per_page = u32::try_from(page.limit()).unwrap_or(u32::MAX);
        Ok(PageResponse::new(items, page.page.max(1), per_page, total))
    }

    /// Inserts the given defaults for categories that have no limit yet.
    /// Returns the categories that were seeded.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidLimit` for a default outside `(0, MAX_AMOUNT]` and
    /// `LedgerError::Storage` if the store fails.
    pub async fn seed_default_limits(
        &self,
        user_id: UserId,
        defaults: &BTreeMap<Category, Decimal>,
    ) -> Result<Vec<Category>, LedgerError> {
        let existing: Vec<Category> = self
            .store
            .list_limits(user_id)
            .await?
            .into_iter()
            .map(|l| l.category)
            .collect();

        let mut seeded = Vec::new();
        for (category, amount) in defaults {
            if existing.contains(category) {
                continue;
            }
            self.set_limit(user_id, *category, *amount).await?;
            seeded.push(*category);
        }

        if !seeded.is_empty() {
            info!(user_id = %user_id, count = seeded.len(), "Seeded default budget limits");
        }
        Ok(seeded)
    }
}
