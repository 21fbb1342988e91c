//! Typed decoding of model output.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use voxledger_shared::types::Category;

use crate::expense::ExpenseDraft;

/// What a message wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Record an expense.
    Expense,
    /// Ask about spending.
    Analytics,
    /// Anything else.
    Unknown,
}

impl Intent {
    /// Decodes `{"intention": "..."}`, also accepting a bare word.
    /// Anything unrecognised is `Unknown`.
    #[must_use]
    pub fn from_model_output(content: &str) -> Self {
        let word = match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => map
                .get("intention")
                .and_then(Value::as_str)
                .map(str::to_string),
            Ok(Value::String(s)) => Some(s),
            _ => Some(content.trim().trim_matches('"').to_string()),
        };

        match word.as_deref().map(|w| w.trim().to_lowercase()).as_deref() {
            Some("expense") => Self::Expense,
            Some("analytics") => Self::Analytics,
            _ => Self::Unknown,
        }
    }
}

/// Which analytics report to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsKind {
    /// One category in detail.
    Category,
    /// Budget limits and what remains.
    Limit,
    /// Totals per category.
    #[default]
    Summary,
}

impl AnalyticsKind {
    /// Decodes `{"type": "..."}`. Defaults to `Summary`.
    #[must_use]
    pub fn from_model_output(content: &str) -> Self {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => map
                .get("type")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            _ => content.trim().parse().unwrap_or_default(),
        }
    }
}

impl FromStr for AnalyticsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "limit" | "limits" => Ok(Self::Limit),
            "summary" => Ok(Self::Summary),
            _ => Err(format!("Unknown analytics type: {s}")),
        }
    }
}

/// Decodes `{"category": "..."}`. Values outside the fixed set yield `None`.
#[must_use]
pub fn parse_category(content: &str) -> Option<Category> {
    match serde_json::from_str::<Value>(content).ok()? {
        Value::Object(map) => map.get("category")?.as_str()?.parse().ok(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Result of decoding an extraction response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Fields were found. They still need validation.
    Parsed(ExpenseDraft),
    /// The model found no expense in the message.
    Empty,
    /// The response could not be decoded.
    Malformed(String),
}

impl ExtractionOutcome {
    /// Decodes `{"amount": ..., "category": ..., "description": ...}`.
    ///
    /// `amount` may be a JSON number or a numeric string. An empty object,
    /// or one whose fields are all null, is `Empty`.
    #[must_use]
    pub fn from_model_output(content: &str) -> Self {
        let map = match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => map,
            Ok(other) => return Self::Malformed(format!("expected a JSON object, got {other}")),
            Err(e) => return Self::Malformed(format!("invalid JSON: {e}")),
        };

        let amount = match decode_amount(&map) {
            Ok(amount) => amount,
            Err(reason) => return Self::Malformed(reason),
        };
        let category = optional_string(&map, "category");
        let description = optional_string(&map, "description");

        if amount.is_none() && category.is_none() && description.is_none() {
            return Self::Empty;
        }

        Self::Parsed(ExpenseDraft {
            amount,
            category,
            description,
        })
    }
}

fn decode_amount(map: &Map<String, Value>) -> Result<Option<Decimal>, String> {
    match map.get("amount") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => decimal_from_str(&n.to_string())
            .map(Some)
            .ok_or_else(|| format!("amount is not a decimal: {n}")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => decimal_from_str(&s.trim().replace(',', "."))
            .map(Some)
            .ok_or_else(|| format!("amount is not numeric: {s}")),
        Some(other) => Err(format!("amount has unexpected type: {other}")),
    }
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn optional_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
