//! `SeaORM` entity definitions.

pub mod prelude;

pub mod budget_limits;
pub mod expenses;
