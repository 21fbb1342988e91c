//! HTTP plumbing shared by both clients.

use std::time::Duration;

use voxledger_core::assistant::AssistantError;
use voxledger_shared::AssistantConfig;

use crate::wire::ApiErrorBody;

/// Builds the HTTP client with the configured timeout.
pub(crate) fn build_client(config: &AssistantConfig) -> Result<reqwest::Client, AssistantError> {
    reqwest::Client::builder()
        .user_agent(concat!("voxledger/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AssistantError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Joins the base URL and an endpoint path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Returns the key or a `NotConfigured` error.
pub(crate) fn require_key(api_key: Option<&str>) -> Result<&str, AssistantError> {
    api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AssistantError::NotConfigured("no API key set".to_string()))
}

/// Reads the body, turning a non-success status into `AssistantError::Api`.
pub(crate) async fn read_body(resp: reqwest::Response) -> Result<String, AssistantError> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| AssistantError::Transport(format!("failed to read response: {e}")))?;

    if !status.is_success() {
        return Err(AssistantError::Api {
            status: status.as_u16(),
            message: api_message(&text),
        });
    }

    Ok(text)
}

pub(crate) fn transport(err: &reqwest::Error) -> AssistantError {
    if err.is_timeout() {
        AssistantError::Transport("request timed out".to_string())
    } else {
        AssistantError::Transport(format!("request failed: {err}"))
    }
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map_or_else(|_| body.trim().to_string(), |b| b.error.message)
}
