//! Application configuration management.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{Category, Currency};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Messaging front end configuration.
    pub bot: BotConfig,
    /// Language model and transcription configuration.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Budget ledger configuration.
    #[serde(default)]
    pub budget: BudgetConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Messaging front end configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// The single account allowed to talk to the service.
    pub authorized_user_id: i64,
    /// Optional shared bearer token required on every protected request.
    #[serde(default)]
    pub api_token: Option<String>,
}

/// Language model and transcription configuration.
#[derive(Clone, Deserialize)]
pub struct AssistantConfig {
    /// API key. Without it every assistant call fails with "not configured".
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Chat model used for classification and extraction.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Audio transcription model.
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Translate incoming text to English before classification.
    #[serde(default = "default_translate_input")]
    pub translate_input: bool,
    /// ISO-639-1 hint passed to the transcription model, e.g. `uk`.
    #[serde(default)]
    pub transcription_language: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            transcription_model: default_transcription_model(),
            timeout_secs: default_timeout_secs(),
            translate_input: default_translate_input(),
            transcription_language: None,
        }
    }
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("transcription_model", &self.transcription_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("translate_input", &self.translate_input)
            .field("transcription_language", &self.transcription_language)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

const fn default_translate_input() -> bool {
    true
}

/// What happens when a new expense pushes a category over its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitPolicy {
    /// Record the expense and warn.
    #[default]
    Soft,
    /// Refuse to record the expense.
    Hard,
}

/// Budget ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetConfig {
    /// Over-limit policy.
    #[serde(default)]
    pub policy: LimitPolicy,
    /// Currency used when rendering amounts.
    #[serde(default)]
    pub currency: Currency,
    /// Category assigned when extraction yields none or an unknown one.
    /// `None` rejects such expenses instead.
    #[serde(default = "default_fallback_category")]
    pub fallback_category: Option<Category>,
    /// Per-category overrides of the built-in default monthly limits.
    #[serde(default)]
    pub default_limits: BTreeMap<Category, Decimal>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            policy: LimitPolicy::default(),
            currency: Currency::default(),
            fallback_category: default_fallback_category(),
            default_limits: BTreeMap::new(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_fallback_category() -> Option<Category> {
    Some(Category::Others)
}

impl BudgetConfig {
    /// Built-in monthly limits, in currency units.
    pub const BUILTIN_LIMITS: [(Category, i64); 6] = [
        (Category::Foods, 2000),
        (Category::Shopping, 1500),
        (Category::Housing, 3000),
        (Category::Transportation, 1000),
        (Category::Entertainment, 1000),
        (Category::Others, 1000),
    ];

    /// Returns the default limit for every category, with configured
    /// overrides applied on top of the built-in values.
    #[must_use]
    pub fn effective_default_limits(&self) -> BTreeMap<Category, Decimal> {
        let mut limits: BTreeMap<Category, Decimal> = Self::BUILTIN_LIMITS
            .iter()
            .map(|(category, amount)| (*category, Decimal::from(*amount)))
            .collect();
        limits.extend(self.default_limits.iter().map(|(c, a)| (*c, *a)));
        limits
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VOXLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
