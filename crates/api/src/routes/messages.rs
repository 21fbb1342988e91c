//! Message intake: text and voice.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Deserialize;
use tracing::info;
use voxledger_core::pipeline::Reply;

use crate::middleware::Sender;
use crate::{ApiError, AppState, Backend};

/// Largest accepted voice upload.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Multipart field carrying the audio.
const AUDIO_FIELD: &str = "audio";

/// Creates the message routes (requires sender middleware to be applied externally).
pub fn routes<B: Backend>() -> Router<AppState<B>> {
    Router::new()
        .route("/messages", post(post_text::<B>))
        .route(
            "/messages/voice",
            post(post_voice::<B>).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
}

/// Request body for a text message.
#[derive(Debug, Deserialize)]
pub struct TextMessageRequest {
    /// Message text as the user typed it.
    pub text: String,
}

async fn post_text<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    Json(body): Json<TextMessageRequest>,
) -> Json<Reply> {
    let reply = state
        .processor
        .process_text(sender.user_id(), &body.text)
        .await;
    info!(user_id = %sender.user_id(), kind = ?reply.kind, "Text message processed");
    Json(reply)
}

async fn post_voice<B: Backend>(
    State(state): State<AppState<B>>,
    sender: Sender,
    mut multipart: Multipart,
) -> Result<Json<Reply>, ApiError> {
    let mut audio = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("voice.ogg").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("Could not read audio: {e}")))?;
        audio = Some((file_name, bytes));
        break;
    }

    let Some((file_name, bytes)) = audio else {
        return Err(ApiError::validation("Multipart field 'audio' is required"));
    };
    if bytes.is_empty() {
        return Err(ApiError::validation("Audio is empty"));
    }

    let reply = state
        .processor
        .process_voice(
            state.transcriber.as_ref(),
            sender.user_id(),
            bytes.to_vec(),
            &file_name,
        )
        .await;
    info!(user_id = %sender.user_id(), kind = ?reply.kind, "Voice message processed");
    Ok(Json(reply))
}
