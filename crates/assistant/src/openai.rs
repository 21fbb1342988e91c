//! Chat-completions client.

use std::time::Instant;

use tracing::debug;
use voxledger_core::assistant::{
    AnalyticsKind, Assistant, AssistantError, ExtractionOutcome, Intent, parse_category,
};
use voxledger_shared::AssistantConfig;
use voxledger_shared::types::Category;

use crate::http::{build_client, endpoint, read_body, require_key, transport};
use crate::prompts;
use crate::wire::{ChatRequest, ChatResponse};

/// `Assistant` backed by an OpenAI-compatible chat-completions API.
#[derive(Clone)]
pub struct OpenAiAssistant {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAssistant")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiAssistant {
    /// Creates a client from configuration.
    ///
    /// A missing API key is not an error here; every call then fails with
    /// `AssistantError::NotConfigured`.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        Ok(Self {
            http: build_client(config)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.chat_model.clone(),
        })
    }

    /// Returns whether an API key is set.
    pub fn is_configured(&self) -> bool {
        require_key(self.api_key.as_deref()).is_ok()
    }

    /// Sends one system prompt and one user message; returns the first
    /// choice's content.
    async fn complete(&self, system: &str, user: &str, json: bool) -> Result<String, AssistantError> {
        let api_key = require_key(self.api_key.as_deref())?;
        let body = ChatRequest::new(&self.model, system, user, json);
        let start = Instant::now();

        let resp = self
            .http
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let text = read_body(resp).await?;
        debug!(
            model = %self.model,
            elapsed_ms = start.elapsed().as_millis(),
            bytes = text.len(),
            "chat completion received"
        );

        serde_json::from_str::<ChatResponse>(&text)
            .map_err(|e| AssistantError::Decode(e.to_string()))?
            .into_content()
            .ok_or_else(|| AssistantError::Decode("response carried no message content".to_string()))
    }
}

impl Assistant for OpenAiAssistant {
    async fn translate(&self, text: &str) -> Result<String, AssistantError> {
        let translated = self.complete(prompts::TRANSLATE, text, false).await?;
        let translated = translated.trim();

        if translated.is_empty() {
            return Err(AssistantError::Decode("empty translation".to_string()));
        }
        Ok(translated.to_string())
    }

    async fn classify_intent(&self, text: &str) -> Result<Intent, AssistantError> {
        let content = self.complete(prompts::INTENT, text, true).await?;
        let intent = Intent::from_model_output(&content);
        debug!(?intent, "intent classified");
        Ok(intent)
    }

    async fn extract_expense(&self, text: &str) -> Result<ExtractionOutcome, AssistantError> {
        let content = self.complete(&prompts::extraction(), text, true).await?;
        Ok(ExtractionOutcome::from_model_output(&content))
    }

    async fn analytics_kind(&self, text: &str) -> Result<AnalyticsKind, AssistantError> {
        let content = self.complete(prompts::ANALYTICS_KIND, text, true).await?;
        Ok(AnalyticsKind::from_model_output(&content))
    }

    async fn query_category(&self, text: &str) -> Result<Option<Category>, AssistantError> {
        let content = self.complete(&prompts::query_category(), text, true).await?;
        Ok(parse_category(&content))
    }
}
