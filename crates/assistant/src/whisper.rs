//! Audio transcription client.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};
use voxledger_core::assistant::{AssistantError, Transcriber};
use voxledger_shared::AssistantConfig;

use crate::http::{build_client, endpoint, read_body, require_key, transport};

/// `Transcriber` backed by an OpenAI-compatible `/audio/transcriptions` endpoint.
#[derive(Clone)]
pub struct WhisperTranscriber {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    language: Option<String>,
}

impl std::fmt::Debug for WhisperTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperTranscriber")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl WhisperTranscriber {
    /// Creates a client from configuration.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        Ok(Self {
            http: build_client(config)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.transcription_model.clone(),
            language: config.transcription_language.clone(),
        })
    }
}

/// Guesses the audio MIME type from the file extension.
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("ogg" | "oga" | "opus") => "audio/ogg",
        Some("mp3" | "mpga" | "mpeg") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a" | "mp4") => "audio/mp4",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, AssistantError> {
        let api_key = require_key(self.api_key.as_deref())?;
        let size = audio.len();

        let file = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))
            .map_err(|e| transport(&e))?;

        let mut form = Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file);
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }

        let resp = self
            .http
            .post(endpoint(&self.base_url, "audio/transcriptions"))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let transcript = read_body(resp).await?.trim().to_string();
        info!(bytes = size, "audio transcribed");
        debug!(%transcript, "transcript");

        Ok(transcript)
    }
}
