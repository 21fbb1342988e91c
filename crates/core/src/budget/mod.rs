//! Budget Ledger: per-category monthly spend tracked against limits.

pub mod error;
pub mod ledger;
pub mod memory;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::LedgerError;
pub use ledger::BudgetLedger;
pub use memory::InMemoryLedgerStore;
pub use service::BudgetService;
pub use store::LedgerStore;
pub use types::{BudgetIndicator, BudgetLimit, LimitCheck, LimitStatus, RecordedExpense};
pub use voxledger_shared::LimitPolicy;
