//! The fixed expense category set.
//!
//! Both expenses and budget limits draw from these six values. Parsing is
//! case-insensitive so configuration keys and model output can be matched
//! without normalization at every call site.

use serde::{Deserialize, Serialize};

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    /// Groceries, restaurants, cafes.
    Foods,
    /// Clothes, electronics, general purchases.
    Shopping,
    /// Rent, utilities, furniture, internet.
    Housing,
    /// Taxi, public transport, fuel.
    Transportation,
    /// Cinema, concerts, sport, going out.
    Entertainment,
    /// Anything else.
    Others,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Foods,
        Self::Shopping,
        Self::Housing,
        Self::Transportation,
        Self::Entertainment,
        Self::Others,
    ];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Foods => "Foods",
            Self::Shopping => "Shopping",
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Others => "Others",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}
