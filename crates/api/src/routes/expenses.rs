//! Structured expense routes.
//!
//! `POST /expenses` saves an already-structured expense without going through
//! extraction; the same validation and limit policy apply.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use voxledger_core::budget::RecordedExpense;
use voxledger_core::expense::{Expense, ExpenseDraft};
use voxledger_shared::types::{PageRequest, PageResponse};

use crate::middleware::Sender;
use crate::{ApiError, AppState, Backend};

/// Creates the expense routes (requires sender middleware to be applied externally).
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new().route(
        "/expenses",
        get(list_expenses::<B>).post(create_expense::<B>),
    )
}

/// Request body for a structured expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Positive amount.
    pub amount: Decimal,
    /// Category name.
    pub category: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Source text to keep with the expense; defaults to the description.
    #[serde(default)]
    pub original_text: Option<String>,
}

async fn create_expense<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Json(body): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<RecordedExpense>), ApiError> {
    let valid = ExpenseDraft {
        amount: Some(body.amount),
        category: Some(body.category),
        description: body.description,
    }
    .validate(None)?;

    let original_text = body
        .original_text
        .unwrap_or_else(|| valid.description.clone());

    let recorded = state
        .ledger()
        .record_expense(sender.user_id(), valid, original_text)
        .await?;

    info!(
        user_id = %sender.user_id(),
        expense_id = %recorded.expense.id,
        over_limit = recorded.check.over_limit,
        "Structured expense recorded"
    );
    Ok((StatusCode::CREATED, Json(recorded)))
}

async fn list_expenses<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<Expense>>, ApiError> {
    let page = state.ledger().list_expenses(sender.user_id(), page).await?;
    Ok(Json(page))
}
