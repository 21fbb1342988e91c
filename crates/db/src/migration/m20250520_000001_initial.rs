//! Initial database migration.
//!
//! Creates the expense ledger and the per-category budget limits.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(BUDGET_LIMITS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id              BIGSERIAL PRIMARY KEY,
    user_id         BIGINT NOT NULL,
    category        VARCHAR(32) NOT NULL CHECK (category IN (
                        'Foods', 'Shopping', 'Housing',
                        'Transportation', 'Entertainment', 'Others'
                    )),
    amount          NUMERIC(14, 2) NOT NULL CHECK (amount > 0),
    description     TEXT NOT NULL DEFAULT '',
    original_text   TEXT NOT NULL DEFAULT '',
    created_at      TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
);

CREATE INDEX idx_expenses_user_category_created
    ON expenses (user_id, category, created_at);
CREATE INDEX idx_expenses_user_created
    ON expenses (user_id, created_at DESC);
";

const BUDGET_LIMITS_SQL: &str = r"
CREATE TABLE budget_limits (
    id              BIGSERIAL PRIMARY KEY,
    user_id         BIGINT NOT NULL,
    category        VARCHAR(32) NOT NULL CHECK (category IN (
                        'Foods', 'Shopping', 'Housing',
                        'Transportation', 'Entertainment', 'Others'
                    )),
    limit_amount    NUMERIC(14, 2) NOT NULL CHECK (limit_amount > 0),

    CONSTRAINT uq_budget_limits_user_category UNIQUE (user_id, category)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS budget_limits CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
";
