//! Budget limit repository.
//!
//! One row per (user, category), enforced by a unique constraint; writes go
//! through `INSERT ... ON CONFLICT DO UPDATE`.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use voxledger_core::budget::BudgetLimit;
use voxledger_shared::types::{BudgetLimitId, Category, UserId};

use crate::entities::budget_limits;

/// Error types for budget limit operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetLimitError {
    /// A stored row holds a category outside the fixed set.
    #[error("Invalid category in budget limit {id}: {category}")]
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

/// Budget limit repository for database operations.
#[derive(Debug, Clone)]
pub struct BudgetLimitRepository {
    db: DatabaseConnection,
}

impl BudgetLimitRepository {
    /// Creates a new budget limit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the limit of a category.
    pub async fn find(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Option<BudgetLimit>, BudgetLimitError> {
        find(&self.db, user_id, category, false).await
    }

    /// Lists all limits of a user.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<BudgetLimit>, BudgetLimitError> {
        budget_limits::Entity::find()
            .filter(budget_limits::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(budget_limits::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    /// Sets the limit of a category, inserting or updating the row.
    pub async fn upsert(
        &self,
        user_id: UserId,
        category: Category,
        limit_amount: Decimal,
    ) -> Result<BudgetLimit, BudgetLimitError> {
        let model = budget_limits::ActiveModel {
            user_id: Set(user_id.into_inner()),
            category: Set(category.as_str().to_string()),
            limit_amount: Set(limit_amount),
            ..Default::default()
        };

        let saved = budget_limits::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    budget_limits::Column::UserId,
                    budget_limits::Column::Category,
                ])
                .update_column(budget_limits::Column::LimitAmount)
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        to_domain(saved)
    }
}

/// Looks up a limit on any connection. With `for_update` the row stays
/// locked until the surrounding transaction ends.
pub(crate) async fn find<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    category: Category,
    for_update: bool,
) -> Result<Option<BudgetLimit>, BudgetLimitError> {
    let mut query = budget_limits::Entity::find()
        .filter(budget_limits::Column::UserId.eq(user_id.into_inner()))
        .filter(budget_limits::Column::Category.eq(category.as_str()));

    if for_update {
        query = query.lock_exclusive();
    }

    query.one(conn).await?.map(to_domain).transpose()
}

fn to_domain(model: budget_limits::Model) -> Result<BudgetLimit, BudgetLimitError> {
    let category = model
        .category
        .parse::<Category>()
        .map_err(|_| BudgetLimitError::InvalidCategory {
            id: model.id,
            category: model.category.clone(),
        })?;

    Ok(BudgetLimit {
        id: BudgetLimitId::new(model.id),
        user_id: UserId::new(model.user_id),
        category,
        limit_amount: model.limit_amount,
    })
}
