//! Common types used across the application.

pub mod category;
pub mod id;
pub mod money;
pub mod pagination;

pub use category::{Category, UnknownCategory};
pub use id::*;
pub use money::{Currency, MAX_AMOUNT, Money, is_storable_amount};
pub use pagination::{PageMeta, PageRequest, PageResponse};
