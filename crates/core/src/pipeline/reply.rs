//! Reply types.

use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsReport;
use crate::budget::RecordedExpense;

/// Outcome category of a processed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// An expense was stored.
    ExpenseRecorded,
    /// The hard limit policy refused the expense.
    ExpenseRejected,
    /// The message looked like an expense but could not be turned into one.
    NotRecognized,
    /// An analytics report.
    Analytics,
    /// Usage help for messages with no recognisable intent.
    Help,
    /// Something failed on our side.
    Failure,
}

/// Reply to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Outcome category.
    pub kind: ReplyKind,
    /// Text to send back to the user.
    pub text: String,
    /// Transcript of a voice message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// The stored expense, for `ExpenseRecorded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<RecordedExpense>,
    /// The report, for `Analytics`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalyticsReport>,
}

impl Reply {
    /// A reply carrying only text.
    #[must_use]
    pub fn text(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            transcript: None,
            expense: None,
            report: None,
        }
    }

    /// Attaches a voice transcript.
    #[must_use]
    pub fn with_transcript(mut self, transcript: String) -> Self {
        self.transcript = Some(transcript);
        self
    }
}
