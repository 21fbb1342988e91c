//! Drafts produced by the extraction service and their validation.
//!
//! Nothing reaches the ledger without passing through [`ExpenseDraft::validate`],
//! so the ledger only ever sees a known category and a positive amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxledger_shared::types::{Category, MAX_AMOUNT};

/// Description stored when the extraction yields none.
pub const NO_DESCRIPTION: &str = "No description";

/// Raw fields extracted from a message. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Extracted amount.
    pub amount: Option<Decimal>,
    /// Extracted category name, not yet checked against the fixed set.
    pub category: Option<String>,
    /// Extracted description.
    pub description: Option<String>,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidExpense {
    /// Positive amount, two decimal places.
    pub amount: Decimal,
    /// Known category.
    pub category: Category,
    /// Non-empty description.
    pub description: String,
}

/// Why a draft was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// No amount was extracted.
    #[error("No amount found in the message")]
    MissingAmount,

    /// The amount is zero or negative.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The amount is larger than the ledger can store.
    #[error("Amount must not exceed {max}, got {0}", max = MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    /// The category is outside the fixed set and no fallback is configured.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// No category was extracted and no fallback is configured.
    #[error("No category found in the message")]
    MissingCategory,
}

impl ExpenseDraft {
    /// Validates the draft.
    ///
    /// Missing or unknown categories map to `fallback` when one is given.
    ///
    /// # Errors
    ///
    /// Returns `DraftError` if the amount is missing, not positive or above
    /// `MAX_AMOUNT`, or the category cannot be resolved.
    pub fn validate(&self, fallback: Option<Category>) -> Result<ValidExpense, DraftError> {
        let amount = self
            .amount
            .ok_or(DraftError::MissingAmount)?
            .round_dp(2);
        if amount <= Decimal::ZERO {
            return Err(DraftError::NonPositiveAmount(amount));
        }
        if amount > MAX_AMOUNT {
            return Err(DraftError::AmountTooLarge(amount));
        }

        let category = match self.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => match name.parse::<Category>() {
                Ok(category) => category,
                Err(_) => fallback.ok_or_else(|| DraftError::UnknownCategory(name.to_string()))?,
            },
            _ => fallback.ok_or(DraftError::MissingCategory)?,
        };

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();

        Ok(ValidExpense {
            amount,
            category,
            description,
        })
    }
}
