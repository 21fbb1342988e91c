//! Budget limit routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use voxledger_core::analytics::LimitReport;
use voxledger_core::budget::{BudgetLimit, LimitCheck};
use voxledger_shared::types::Category;

use crate::middleware::Sender;
use crate::{ApiError, AppState, Backend};

/// Creates the budget routes (requires sender middleware to be applied externally).
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        .route("/budgets/limits", get(list_limits::<B>))
        .route("/budgets/limits/{category}", put(set_limit::<B>))
        .route(
            "/budgets/limits/{category}/remaining",
            get(get_remaining::<B>),
        )
        .route("/budgets/check", post(check::<B>))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for setting a limit.
#[derive(Debug, Deserialize)]
pub struct SetLimitRequest {
    /// Monthly limit, must be positive.
    pub limit_amount: Decimal,
}

/// Request body for a limit check.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Category name.
    pub category: String,
    /// Amount about to be spent.
    pub amount: Decimal,
}

/// Remaining budget of one category this month.
#[derive(Debug, Serialize)]
pub struct RemainingResponse {
    /// Category.
    pub category: Category,
    /// Whether a limit is configured.
    pub limit_set: bool,
    /// The limit, when set.
    pub limit: Option<Decimal>,
    /// What is left this month, when a limit is set. Negative when overspent.
    pub remaining: Option<Decimal>,
}

/// Parses a category path segment or body field.
pub(crate) fn parse_category(raw: &str) -> Result<Category, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Unknown category: {raw}")))
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_limits<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
) -> Result<Json<LimitReport>, ApiError> {
    let statuses = state.ledger().limit_statuses(sender.user_id()).await?;
    Ok(Json(LimitReport { statuses }))
}

async fn set_limit<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Path(category): Path<String>,
    Json(body): Json<SetLimitRequest>,
) -> Result<Json<BudgetLimit>, ApiError> {
    let category = parse_category(&category)?;
    let limit = state
        .ledger()
        .set_limit(sender.user_id(), category, body.limit_amount)
        .await?;
    Ok(Json(limit))
}

async fn get_remaining<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Path(category): Path<String>,
) -> Result<Json<RemainingResponse>, ApiError> {
    let category = parse_category(&category)?;
    let check = state
        .ledger()
        .check(sender.user_id(), category, Decimal::ZERO)
        .await?;

    Ok(Json(RemainingResponse {
        category,
        limit_set: check.limit.is_some(),
        limit: check.limit,
        remaining: check.remaining,
    }))
}

async fn check<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Json(body): Json<CheckRequest>,
) -> Result<Json<LimitCheck>, ApiError> {
    let category = parse_category(&body.category)?;
    let check = state
        .ledger()
        .check(sender.user_id(), category, body.amount)
        .await?;
    Ok(Json(check))
}
