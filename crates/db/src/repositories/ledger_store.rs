//! PostgreSQL implementation of the budget ledger store.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use voxledger_core::LimitPolicy;
use voxledger_core::budget::{BudgetLimit, BudgetService, LedgerError, LedgerStore, RecordedExpense};
use voxledger_core::expense::{Expense, NewExpense};
use voxledger_shared::types::{Category, PageRequest, UserId};

use super::budget_limit::{self, BudgetLimitError, BudgetLimitRepository};
use super::expense::{self, ExpenseError, ExpenseRepository};

impl From<ExpenseError> for LedgerError {
    fn from(err: ExpenseError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<BudgetLimitError> for LedgerError {
    fn from(err: BudgetLimitError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Ledger store backed by the `expenses` and `budget_limits` tables.
#[derive(Debug, Clone)]
pub struct SqlLedgerStore {
    db: DatabaseConnection,
    expenses: ExpenseRepository,
    limits: BudgetLimitRepository,
}

impl SqlLedgerStore {
    /// Creates a new store.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            expenses: ExpenseRepository::new(db.clone()),
            limits: BudgetLimitRepository::new(db.clone()),
            db,
        }
    }
}

fn storage(err: sea_orm::DbErr) -> LedgerError {
    LedgerError::Storage(err.to_string())
}

impl LedgerStore for SqlLedgerStore {
    async fn get_limit(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Option<BudgetLimit>, LedgerError> {
        Ok(self.limits.find(user_id, category).await?)
    }

    async fn list_limits(&self, user_id: UserId) -> Result<Vec<BudgetLimit>, LedgerError> {
        Ok(self.limits.list(user_id).await?)
    }

    async fn upsert_limit(
        &self,
        user_id: UserId,
        category: Category,
        limit_amount: Decimal,
    ) -> Result<BudgetLimit, LedgerError> {
        Ok(self.limits.upsert(user_id, category, limit_amount).await?)
    }

    async fn month_total(
        &self,
        user_id: UserId,
        category: Category,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal, LedgerError> {
        Ok(self.expenses.sum_between(user_id, category, start, end).await?)
    }

    async fn expenses_between(
        &self,
        user_id: UserId,
        category: Option<Category>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>, LedgerError> {
        Ok(self
            .expenses
            .list_between(user_id, category, start, end)
            .await?)
    }

    async fn list_expenses(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, u64), LedgerError> {
        Ok(self.expenses.list_page(user_id, page).await?)
    }

    async fn record_expense(
        &self,
        expense: NewExpense,
        month_start: NaiveDateTime,
        month_end: NaiveDateTime,
        policy: LimitPolicy,
    ) -> Result<RecordedExpense, LedgerError> {
        let txn = self.db.begin().await.map_err(storage)?;

        // Concurrent saves to the same category queue up on this row lock,
        // so the total read below already includes every committed expense.
        let limit = budget_limit::find(&txn, expense.user_id, expense.category, true)
            .await?
            .map(|l| l.limit_amount);
        let current = expense::sum_between(
            &txn,
            expense.user_id,
            expense.category,
            month_start,
            month_end,
        )
        .await?;

        let check = BudgetService::evaluate(limit, current, expense.amount)?;

        if let (LimitPolicy::Hard, true, Some(limit)) = (policy, check.over_limit, limit) {
            txn.rollback().await.map_err(storage)?;
            tracing::debug!(
                user_id = %expense.user_id,
                category = %expense.category,
                "expense refused, transaction rolled back"
            );
            return Err(LedgerError::LimitExceeded {
                category: expense.category,
                limit,
                amount: expense.amount,
                new_total: current + expense.amount,
            });
        }

        let stored = expense::insert(&txn, expense).await?;
        txn.commit().await.map_err(storage)?;

        Ok(RecordedExpense {
            expense: stored,
            check,
        })
    }
}
