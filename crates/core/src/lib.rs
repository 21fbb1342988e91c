//! Core business logic for Voxledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence and the language-model services are reached through traits
//! implemented by the `db` and `assistant` crates.
//!
//! # Modules
//!
//! - `period` - Free-text time references to date ranges
//! - `budget` - Monthly category limits and spend tracking
//! - `expense` - Expense records and draft validation
//! - `assistant` - Model collaborator traits and output decoding
//! - `analytics` - Spending reports and their text rendering
//! - `pipeline` - Message processing from intent to reply
//! - `clock` - Injectable time source

pub mod analytics;
pub mod assistant;
pub mod budget;
pub mod clock;
pub mod expense;
pub mod period;
pub mod pipeline;

pub use voxledger_shared::LimitPolicy;
pub use voxledger_shared::types::Category;
