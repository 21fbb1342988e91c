//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Message intake for text and voice
//! - Budget, expense and analytics routes
//! - Authorized-sender middleware
//! - JSON error responses
//!
//! The crate is generic over a [`Backend`] so the server can plug in the
//! PostgreSQL store and the HTTP assistant while tests use in-memory doubles.

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use voxledger_core::assistant::{Assistant, Transcriber};
use voxledger_core::budget::{BudgetLedger, LedgerStore};
use voxledger_core::clock::Clock;
use voxledger_core::pipeline::MessageProcessor;
use voxledger_shared::types::UserId;

pub use error::ApiError;

/// The concrete collaborators behind the HTTP surface.
pub trait Backend: Send + Sync + 'static {
    /// Ledger persistence.
    type Store: LedgerStore + 'static;
    /// Language-model operations.
    type Assistant: Assistant + 'static;
    /// Speech-to-text.
    type Transcriber: Transcriber + 'static;
    /// Source of "now".
    type Clock: Clock + Clone + 'static;
}

/// Who may talk to the service.
#[derive(Debug, Clone)]
pub struct SenderPolicy {
    /// The single account whose messages are processed.
    pub authorized_user_id: UserId,
    /// Bearer token required on protected routes, when set.
    pub api_token: Option<Arc<str>>,
}

/// Application state shared across handlers.
pub struct AppState<B: Backend> {
    /// Message pipeline; also owns the ledger.
    pub processor: MessageProcessor<B::Store, B::Assistant, B::Clock>,
    /// Speech-to-text for voice messages.
    pub transcriber: Arc<B::Transcriber>,
    /// Sender authorization.
    pub sender_policy: SenderPolicy,
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            processor: self.processor.clone(),
            transcriber: Arc::clone(&self.transcriber),
            sender_policy: self.sender_policy.clone(),
        }
    }
}

impl<B: Backend> AppState<B> {
    /// Creates the state.
    pub fn new(
        processor: MessageProcessor<B::Store, B::Assistant, B::Clock>,
        transcriber: Arc<B::Transcriber>,
        sender_policy: SenderPolicy,
    ) -> Self {
        Self {
            processor,
            transcriber,
            sender_policy,
        }
    }

    /// The budget ledger.
    pub const fn ledger(&self) -> &BudgetLedger<B::Store, B::Clock> {
        self.processor.ledger()
    }
}

/// Creates the main application router.
pub fn create_router<B: Backend>(state: AppState<B>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
