//! Expense repository for expense database operations.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use voxledger_core::expense::{Expense, NewExpense};
use voxledger_shared::types::{Category, ExpenseId, PageRequest, UserId};

use crate::entities::expenses;

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// A stored row holds a category outside the fixed set.
    #[error("Invalid category in expense {id}: {category}")]
    InvalidCategory {
        /// Row ID.
        id: i64,
        /// Stored value.
        category: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Expense repository for database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an expense.
    pub async fn create(&self, input: NewExpense) -> Result<Expense, ExpenseError> {
        insert(&self.db, input).await
    }

    /// Sum of amounts with `start <= created_at < end`.
    pub async fn sum_between(
        &self,
        user_id: UserId,
        category: Category,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal, ExpenseError> {
        sum_between(&self.db, user_id, category, start, end).await
    }

    /// Expenses with `start <= created_at <= end`, newest first.
    pub async fn list_between(
        &self,
        user_id: UserId,
        category: Option<Category>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let mut query = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id.into_inner()))
            .filter(expenses::Column::CreatedAt.gte(start))
            .filter(expenses::Column::CreatedAt.lte(end));

        if let Some(category) = category {
            query = query.filter(expenses::Column::Category.eq(category.as_str()));
        }

        query
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// One page of expenses, newest first, with the total count.
    pub async fn list_page(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<(Vec<Expense>, u64), ExpenseError> {
        let base = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id.into_inner()));

        let total = base.clone().count(&self.db).await?;

        let items = base
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }
}

/// Inserts an expense on any connection, including an open transaction.
pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    input: NewExpense,
) -> Result<Expense, ExpenseError> {
    let model = expenses::ActiveModel {
        user_id: Set(input.user_id.into_inner()),
        category: Set(input.category.as_str().to_string()),
        amount: Set(input.amount),
        description: Set(input.description),
        original_text: Set(input.original_text),
        created_at: Set(input.created_at),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    to_domain(model)
}

/// Sums amounts on any connection, including an open transaction.
pub(crate) async fn sum_between<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    category: Category,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Decimal, ExpenseError> {
    let total: Option<Option<Decimal>> = expenses::Entity::find()
        .select_only()
        .column_as(Expr::col(expenses::Column::Amount).sum(), "total")
        .filter(expenses::Column::UserId.eq(user_id.into_inner()))
        .filter(expenses::Column::Category.eq(category.as_str()))
        .filter(expenses::Column::CreatedAt.gte(start))
        .filter(expenses::Column::CreatedAt.lt(end))
        .into_tuple()
        .one(conn)
        .await?;

    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

fn to_domain(model: expenses::Model) -> Result<Expense, ExpenseError> {
    let category = model
        .category
        .parse::<Category>()
        .map_err(|_| ExpenseError::InvalidCategory {
            id: model.id,
            category: model.category.clone(),
        })?;

    Ok(Expense {
        id: ExpenseId::new(model.id),
        user_id: UserId::new(model.user_id),
        category,
        amount: model.amount,
        description: model.description,
        original_text: model.original_text,
        created_at: model.created_at,
    })
}
