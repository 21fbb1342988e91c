//! Voxledger API Server
//!
//! Main entry point for the Voxledger backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voxledger_api::{AppState, Backend, SenderPolicy, create_router};
use voxledger_assistant::{OpenAiAssistant, WhisperTranscriber};
use voxledger_core::budget::BudgetLedger;
use voxledger_core::clock::SystemClock;
use voxledger_core::pipeline::{MessageProcessor, ProcessorSettings};
use voxledger_db::{SqlLedgerStore, connect_with};
use voxledger_shared::AppConfig;
use voxledger_shared::types::UserId;

/// PostgreSQL storage, HTTP assistant, wall clock.
struct Production;

impl Backend for Production {
    type Store = SqlLedgerStore;
    type Assistant = OpenAiAssistant;
    type Transcriber = WhisperTranscriber;
    type Clock = SystemClock;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    // Assistant clients
    let assistant = OpenAiAssistant::from_config(&config.assistant)?;
    let transcriber = WhisperTranscriber::from_config(&config.assistant)?;
    if !assistant.is_configured() {
        warn!("No assistant API key configured; messages will get failure replies");
    }
    info!(
        base_url = %config.assistant.base_url,
        chat_model = %config.assistant.chat_model,
        "Assistant configured"
    );

    // Ledger and message pipeline
    let ledger = BudgetLedger::new(
        Arc::new(SqlLedgerStore::new(db)),
        SystemClock,
        config.budget.policy,
    );
    let owner = UserId::new(config.bot.authorized_user_id);
    let seeded = ledger
        .seed_default_limits(owner, &config.budget.effective_default_limits())
        .await?;
    info!(user_id = %owner, seeded = seeded.len(), policy = ?config.budget.policy, "Budget ledger ready");

    let processor = MessageProcessor::new(
        ledger,
        Arc::new(assistant),
        ProcessorSettings {
            currency: config.budget.currency,
            fallback_category: config.budget.fallback_category,
            translate_input: config.assistant.translate_input,
        },
    );

    // Create application state
    let state = AppState::<Production>::new(
        processor,
        Arc::new(transcriber),
        SenderPolicy {
            authorized_user_id: owner,
            api_token: config.bot.api_token.as_deref().map(Into::into),
        },
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
