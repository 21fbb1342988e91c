//! Structured analytics route.
//!
//! Unlike a chat message, the report kind and category come from query
//! parameters; only the period is still read from free text.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use voxledger_core::analytics::{AnalyticsReport, AnalyticsService};
use voxledger_core::assistant::AnalyticsKind;
use voxledger_core::period::PeriodResolver;

use super::budgets::parse_category;
use crate::middleware::Sender;
use crate::{ApiError, AppState, Backend};

/// Creates the analytics routes (requires sender middleware to be applied externally).
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new().route("/analytics", get(get_report::<B>))
}

/// Query parameters of the analytics route.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Free text naming the period, e.g. "last month". Defaults to this month.
    #[serde(default)]
    pub q: String,
    /// Report kind. Defaults to a summary.
    #[serde(default)]
    pub kind: Option<String>,
    /// Category for a category report.
    #[serde(default)]
    pub category: Option<String>,
}

/// A report with its chat rendering.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    /// Structured report.
    pub report: AnalyticsReport,
    /// The same report as chat text.
    pub text: String,
}

async fn get_report<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let kind = match query.kind.as_deref() {
        None | Some("") => AnalyticsKind::default(),
        Some(raw) => raw.parse::<AnalyticsKind>().map_err(ApiError::validation)?,
    };
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(parse_category)
        .transpose()?;

    let ledger = state.ledger();
    let period = PeriodResolver::resolve(&query.q, ledger.now());
    let report = AnalyticsService::build(ledger, sender.user_id(), period, kind, category).await?;
    let text = state.processor.formatter().render(&report);

    Ok(Json(AnalyticsResponse { report, text }))
}
