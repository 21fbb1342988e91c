//! `SeaORM` entity prelude.

pub use super::budget_limits::Entity as BudgetLimits;
pub use super::expenses::Entity as Expenses;
