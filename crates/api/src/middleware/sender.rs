//! Authorized-sender middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;
use voxledger_shared::types::UserId;

use crate::{AppState, Backend, SenderPolicy};

/// Header carrying the messenger account id of the sender.
pub const SENDER_HEADER: &str = "x-sender-id";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Compares tokens without stopping at the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

fn reject(status: StatusCode, error: &str, message: &str) -> Response {
    (status, Json(json!({ "error": error, "message": message }))).into_response()
}

/// Checks the request against the policy, returning the sender on success.
fn authorize(policy: &SenderPolicy, headers: &HeaderMap) -> Result<UserId, Response> {
    if let Some(expected) = policy.api_token.as_deref() {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer_token);

        match token {
            Some(token) if tokens_match(token, expected) => {}
            Some(_) => {
                return Err(reject(
                    StatusCode::UNAUTHORIZED,
                    "invalid_token",
                    "Invalid bearer token",
                ));
            }
            None => {
                return Err(reject(
                    StatusCode::UNAUTHORIZED,
                    "missing_token",
                    "Authorization header with Bearer token is required",
                ));
            }
        }
    }

    let Some(raw) = headers.get(SENDER_HEADER).and_then(|h| h.to_str().ok()) else {
        return Err(reject(
            StatusCode::UNAUTHORIZED,
            "missing_sender",
            "X-Sender-Id header is required",
        ));
    };

    let Ok(sender) = raw.parse::<UserId>() else {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "invalid_sender",
            "X-Sender-Id must be a numeric account id",
        ));
    };

    if sender != policy.authorized_user_id {
        warn!(sender = %sender, "Rejected message from unauthorized sender");
        return Err(reject(
            StatusCode::FORBIDDEN,
            "forbidden",
            "This account is not allowed to use the service",
        ));
    }

    Ok(sender)
}

/// Middleware admitting only the configured account.
///
/// This middleware:
/// 1. Checks the bearer token when one is configured
/// 2. Requires `X-Sender-Id` to equal the authorized account id
/// 3. Stores the sender in request extensions for handlers to access
pub async fn sender_middleware<B: Backend>(
    State(state): State<AppState<B>>,
    mut request: Request,
    next: Next,
) -> Response {
    match authorize(&state.sender_policy, request.headers()) {
        Ok(sender) => {
            request.extensions_mut().insert(Sender(sender));
            next.run(request).await
        }
        Err(response) => response,
    }
}

/// Extractor for the authorized sender.
///
/// ```ignore
/// async fn handler(sender: Sender) -> impl IntoResponse {
///     let user_id = sender.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Sender(pub UserId);

impl Sender {
    /// Returns the sender's account id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<S> for Sender
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().copied().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Sender not authorized"
                })),
            )
        })
    }
}
