//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, Backend, middleware::sender_middleware};

pub mod analytics;
pub mod budgets;
pub mod expenses;
pub mod health;
pub mod messages;

/// Creates the API router; every route requires the authorized sender.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state<B: Backend>(state: AppState<B>) -> Router<AppState<B>> {
    Router::new()
        .merge(messages::routes())
        .merge(budgets::routes())
        .merge(expenses::routes())
        .merge(analytics::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            sender_middleware::<B>,
        ))
}
