//! Application-wide error types.
//!
//! Each layer keeps its own error enum; at the HTTP edge they all collapse
//! into an `AppError`, which decides status, code and the text the sender sees.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request or an extracted expense failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The hard limit policy refused an expense.
    #[error("Budget limit exceeded: {0}")]
    LimitExceeded(String),

    /// The persistence store failed. Never retried.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// The language-model or transcription service failed.
    #[error("Assistant failure: {0}")]
    Assistant(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::LimitExceeded(_) => 422,
            Self::Storage(_) => 500,
            Self::Assistant(_) => 502,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::LimitExceeded(_) => "limit_exceeded",
            Self::Storage(_) => "storage_failure",
            Self::Assistant(_) => "assistant_unavailable",
        }
    }

    /// True for failures on our side rather than the sender's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Assistant(_))
    }

    /// Returns the message safe to show to the sender.
    ///
    /// Server-side failures collapse to a generic text; details only go to logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) => {
                "Something went wrong while processing your request. Please try again.".to_string()
            }
            Self::Assistant(_) => {
                "The assistant is unavailable right now. Please try again later.".to_string()
            }
            Self::Validation(msg) | Self::LimitExceeded(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation(String::new()), 400, "validation_error")]
    #[case(AppError::LimitExceeded(String::new()), 422, "limit_exceeded")]
    #[case(AppError::Storage(String::new()), 500, "storage_failure")]
    #[case(AppError::Assistant(String::new()), 502, "assistant_unavailable")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_server_errors() {
        assert!(AppError::Storage(String::new()).is_server_error());
        assert!(AppError::Assistant(String::new()).is_server_error());
        assert!(!AppError::Validation(String::new()).is_server_error());
        assert!(!AppError::LimitExceeded(String::new()).is_server_error());
    }

    #[test]
    fn test_public_message_hides_server_details() {
        let err = AppError::Storage("connection refused on 10.0.0.5".into());
        assert!(!err.public_message().contains("10.0.0.5"));

        let err = AppError::Assistant("401 Incorrect API key sk-abc".into());
        assert!(!err.public_message().contains("sk-abc"));

        let err = AppError::Validation("Amount must be greater than zero".into());
        assert_eq!(err.public_message(), "Amount must be greater than zero");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::LimitExceeded("Foods".into()).to_string(),
            "Budget limit exceeded: Foods"
        );
        assert_eq!(
            AppError::Storage("pool timed out".into()).to_string(),
            "Storage failure: pool timed out"
        );
    }
}
