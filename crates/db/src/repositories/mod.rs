//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod budget_limit;
pub mod expense;
pub mod ledger_store;

pub use budget_limit::{BudgetLimitError, BudgetLimitRepository};
pub use expense::{ExpenseError, ExpenseRepository};
pub use ledger_store::SqlLedgerStore;
