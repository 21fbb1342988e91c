//! Shared types, errors, and configuration for Voxledger.
//!
//! This crate provides common types used across all other crates:
//! - The fixed expense `Category` set
//! - Money formatting with decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, AssistantConfig, BotConfig, BudgetConfig, LimitPolicy};
pub use error::AppError;
pub use types::{Category, Currency, Money};
