//! Expense records and the validation boundary for extracted drafts.

pub mod draft;
pub mod types;

pub use draft::{DraftError, ExpenseDraft, NO_DESCRIPTION, ValidExpense};
pub use types::{Expense, NewExpense};
