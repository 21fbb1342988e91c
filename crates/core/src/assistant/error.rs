//! Assistant error types.

use thiserror::Error;
use voxledger_shared::AppError;

/// Failures talking to the model or transcription service.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("Assistant transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Assistant API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error text returned by the service.
        message: String,
    },

    /// The response body could not be understood.
    #[error("Could not decode assistant response: {0}")]
    Decode(String),

    /// No credentials are configured.
    #[error("Assistant is not configured: {0}")]
    NotConfigured(String),
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        Self::Assistant(err.to_string())
    }
}
