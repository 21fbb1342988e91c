//! Chat-completion and transcription clients for Voxledger.
//!
//! Both clients speak the OpenAI-compatible HTTP API:
//! - [`OpenAiAssistant`] implements `voxledger_core::assistant::Assistant`
//!   with one system prompt per task and JSON-object responses
//! - [`WhisperTranscriber`] implements `voxledger_core::assistant::Transcriber`
//!   with a multipart upload
//!
//! Neither client retries; a failed call surfaces as `AssistantError`.

mod http;
pub mod openai;
pub mod prompts;
pub mod whisper;
mod wire;

pub use openai::OpenAiAssistant;
pub use whisper::WhisperTranscriber;
