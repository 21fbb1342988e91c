//! Collaborator traits.

use voxledger_shared::types::Category;

use super::error::AssistantError;
use super::parse::{AnalyticsKind, ExtractionOutcome, Intent};

/// Language-model operations used by the message pipeline.
///
/// This trait is implemented by the assistant crate against a chat-completion API.
pub trait Assistant: Send + Sync {
    /// Translates text to English.
    fn translate(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String, AssistantError>> + Send;

    /// Decides whether a message records an expense or asks for analytics.
    fn classify_intent(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Intent, AssistantError>> + Send;

    /// Extracts amount, category and description from an expense message.
    fn extract_expense(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<ExtractionOutcome, AssistantError>> + Send;

    /// Decides which analytics report a query asks for.
    fn analytics_kind(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<AnalyticsKind, AssistantError>> + Send;

    /// Finds the category an analytics query is about, if any.
    fn query_category(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Option<Category>, AssistantError>> + Send;
}

/// Speech-to-text.
pub trait Transcriber: Send + Sync {
    /// Transcribes an audio file. `file_name` carries the container format.
    fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> impl std::future::Future<Output = Result<String, AssistantError>> + Send;
}
