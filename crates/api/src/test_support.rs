//! Test doubles and request helpers shared by the route tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header::CONTENT_TYPE};
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use serde_json::Value;
use voxledger_core::LimitPolicy;
use voxledger_core::assistant::{
    AnalyticsKind, Assistant, AssistantError, ExtractionOutcome, Intent, Transcriber,
};
use voxledger_core::budget::{BudgetLedger, InMemoryLedgerStore};
use voxledger_core::clock::FixedClock;
use voxledger_core::pipeline::{MessageProcessor, ProcessorSettings};
use voxledger_shared::types::{Category, UserId};

use crate::middleware::SENDER_HEADER;
use crate::{AppState, Backend, SenderPolicy, create_router};

pub const USER: i64 = 42;

/// 2025-05-20 12:00, the instant every test runs at.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 20)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Assistant answering every call from fixed model output.
#[derive(Debug, Default)]
pub struct ScriptedAssistant {
    pub intent: Option<Intent>,
    pub extraction: Option<String>,
    pub kind: Option<AnalyticsKind>,
    pub category: Option<Category>,
    pub seen: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    pub fn expense(extraction: &str) -> Self {
        Self {
            intent: Some(Intent::Expense),
            extraction: Some(extraction.to_string()),
            ..Self::default()
        }
    }

    pub fn analytics(kind: AnalyticsKind, category: Option<Category>) -> Self {
        Self {
            intent: Some(Intent::Analytics),
            kind: Some(kind),
            category,
            ..Self::default()
        }
    }

    fn unavailable() -> AssistantError {
        AssistantError::NotConfigured("scripted".to_string())
    }
}

impl Assistant for ScriptedAssistant {
    async fn translate(&self, text: &str) -> Result<String, AssistantError> {
        Ok(text.to_string())
    }

    async fn classify_intent(&self, text: &str) -> Result<Intent, AssistantError> {
        self.seen.lock().unwrap().push(text.to_string());
        self.intent.ok_or_else(Self::unavailable)
    }

    async fn extract_expense(&self, _text: &str) -> Result<ExtractionOutcome, AssistantError> {
        self.extraction
            .as_deref()
            .map(ExtractionOutcome::from_model_output)
            .ok_or_else(Self::unavailable)
    }

    async fn analytics_kind(&self, _text: &str) -> Result<AnalyticsKind, AssistantError> {
        self.kind.ok_or_else(Self::unavailable)
    }

    async fn query_category(&self, _text: &str) -> Result<Option<Category>, AssistantError> {
        Ok(self.category)
    }
}

/// Transcriber returning a fixed transcript, or failing when it has none.
#[derive(Debug, Default)]
pub struct ScriptedTranscriber {
    pub transcript: Option<String>,
    pub uploads: Mutex<Vec<(String, usize)>>,
}

impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, AssistantError> {
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), audio.len()));
        self.transcript
            .clone()
            .ok_or_else(|| AssistantError::Transport("scripted".to_string()))
    }
}

pub struct TestBackend;

impl Backend for TestBackend {
    type Store = InMemoryLedgerStore;
    type Assistant = ScriptedAssistant;
    type Transcriber = ScriptedTranscriber;
    type Clock = FixedClock;
}

/// Everything a route test needs to arrange and inspect.
pub struct Harness {
    pub app: Router,
    pub state: AppState<TestBackend>,
    pub store: Arc<InMemoryLedgerStore>,
    pub assistant: Arc<ScriptedAssistant>,
    pub transcriber: Arc<ScriptedTranscriber>,
}

impl Harness {
    pub fn new(assistant: ScriptedAssistant) -> Self {
        Self::build(assistant, ScriptedTranscriber::default(), LimitPolicy::Soft, None)
    }

    pub fn build(
        assistant: ScriptedAssistant,
        transcriber: ScriptedTranscriber,
        policy: LimitPolicy,
        api_token: Option<&str>,
    ) -> Self {
        let store = Arc::new(InMemoryLedgerStore::new());
        let assistant = Arc::new(assistant);
        let transcriber = Arc::new(transcriber);
        let ledger = BudgetLedger::new(Arc::clone(&store), FixedClock::new(now()), policy);
        let processor = MessageProcessor::new(
            ledger,
            Arc::clone(&assistant),
            ProcessorSettings::default(),
        );
        let state = AppState::<TestBackend>::new(
            processor,
            Arc::clone(&transcriber),
            SenderPolicy {
                authorized_user_id: UserId::new(USER),
                api_token: api_token.map(Into::into),
            },
        );

        Self {
            app: create_router(state.clone()),
            state,
            store,
            assistant,
            transcriber,
        }
    }
}

/// A request from the authorized sender with an optional JSON body.
pub fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(SENDER_HEADER, USER.to_string());

    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
