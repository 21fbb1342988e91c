//! Boundary to the language-model and transcription collaborators.
//!
//! The traits are implemented by the assistant crate. Raw model output is
//! turned into typed values here, so callers branch on results instead of
//! handling malformed JSON themselves.

pub mod client;
pub mod error;
pub mod parse;

pub use client::{Assistant, Transcriber};
pub use error::AssistantError;
pub use parse::{AnalyticsKind, ExtractionOutcome, Intent, parse_category};
