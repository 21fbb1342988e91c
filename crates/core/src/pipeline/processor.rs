//! Message processor.
//!
//! Every collaborator call finishes before the ledger is touched, so no
//! storage transaction is ever open across a network request. Collaborator
//! failures degrade to the nearest sensible default; storage failures end in
//! a generic failure reply and are not retried.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use voxledger_shared::types::{Category, Currency, UserId};

use super::reply::{Reply, ReplyKind};
use crate::analytics::{AnalyticsService, ReportFormatter};
use crate::assistant::{AnalyticsKind, Assistant, ExtractionOutcome, Intent, Transcriber};
use crate::budget::{BudgetLedger, LedgerError, LedgerStore, RecordedExpense};
use crate::clock::Clock;
use crate::period::PeriodResolver;

/// Shown to the user whenever something fails on our side.
pub const FAILURE_MESSAGE: &str = "Sorry, something went wrong while processing your message. Please try again later.";

const HELP_MESSAGE: &str = "I can record your expenses and answer questions about your spending.\n\n\
Try for example:\n\
• \"Spent 250 on a taxi\"\n\
• \"How much did I spend on food last month?\"\n\
• \"How much budget is left?\"";

const NOT_RECOGNIZED_MESSAGE: &str = "I could not recognize an expense in your message. \
Please mention the amount and what it was for, e.g. \"450 for groceries\".";

/// Tunables of the processor.
#[derive(Debug, Clone, Copy)]
pub struct ProcessorSettings {
    /// Currency used in replies.
    pub currency: Currency,
    /// Category for drafts with a missing or unknown category.
    pub fallback_category: Option<Category>,
    /// Translate messages to English before classification.
    pub translate_input: bool,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            fallback_category: Some(Category::Others),
            translate_input: false,
        }
    }
}

/// Turns inbound messages into ledger operations and replies.
pub struct MessageProcessor<S: LedgerStore, A: Assistant, C: Clock> {
    ledger: BudgetLedger<S, C>,
    assistant: Arc<A>,
    formatter: ReportFormatter,
    settings: ProcessorSettings,
}

impl<S: LedgerStore, A: Assistant, C: Clock + Clone> Clone for MessageProcessor<S, A, C> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            assistant: Arc::clone(&self.assistant),
            formatter: self.formatter,
            settings: self.settings,
        }
    }
}

impl<S: LedgerStore, A: Assistant, C: Clock> MessageProcessor<S, A, C> {
    /// Create a new processor.
    #[must_use]
    pub fn new(ledger: BudgetLedger<S, C>, assistant: Arc<A>, settings: ProcessorSettings) -> Self {
        Self {
            ledger,
            assistant,
            formatter: ReportFormatter::new(settings.currency),
            settings,
        }
    }

    /// The underlying ledger.
    #[must_use]
    pub const fn ledger(&self) -> &BudgetLedger<S, C> {
        &self.ledger
    }

    /// The reply formatter.
    #[must_use]
    pub const fn formatter(&self) -> &ReportFormatter {
        &self.formatter
    }

    /// Processes a text message.
    pub async fn process_text(&self, user_id: UserId, text: &str) -> Reply {
        let original = text.trim();
        if original.is_empty() {
            return Reply::text(ReplyKind::Help, HELP_MESSAGE);
        }

        let text = self.prepare(original).await;

        let intent = match self.assistant.classify_intent(&text).await {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, "Intent classification failed");
                Intent::Unknown
            }
        };
        debug!(user_id = %user_id, intent = ?intent, "Classified message");

        match intent {
            Intent::Expense => self.handle_expense(user_id, &text, original).await,
            Intent::Analytics => self.handle_analytics(user_id, &text).await,
            Intent::Unknown => Reply::text(ReplyKind::Help, HELP_MESSAGE),
        }
    }

    /// Transcribes a voice message and processes the transcript.
    pub async fn process_voice<T: Transcriber>(
        &self,
        transcriber: &T,
        user_id: UserId,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Reply {
        let transcript = match transcriber.transcribe(audio, file_name).await {
            Ok(transcript) => transcript,
            Err(e) => {
                error!(error = %e, "Transcription failed");
                return Reply::text(ReplyKind::Failure, FAILURE_MESSAGE);
            }
        };
        debug!(user_id = %user_id, transcript = %transcript, "Transcribed voice message");

        if transcript.trim().is_empty() {
            return Reply::text(ReplyKind::NotRecognized, "I could not hear anything in that message.")
                .with_transcript(transcript);
        }

        self.process_text(user_id, &transcript)
            .await
            .with_transcript(transcript)
    }

    async fn prepare(&self, text: &str) -> String {
        if !self.settings.translate_input {
            return text.to_string();
        }

        match self.assistant.translate(text).await {
            Ok(translated) if !translated.trim().is_empty() => translated,
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!(error = %e, "Translation failed, using original text");
                text.to_string()
            }
        }
    }

    async fn handle_expense(&self, user_id: UserId, text: &str, original: &str) -> Reply {
        let draft = match self.assistant.extract_expense(text).await {
            Ok(ExtractionOutcome::Parsed(draft)) => draft,
            Ok(ExtractionOutcome::Empty) => {
                return Reply::text(ReplyKind::NotRecognized, NOT_RECOGNIZED_MESSAGE);
            }
            Ok(ExtractionOutcome::Malformed(reason)) => {
                warn!(reason = %reason, "Malformed extraction response");
                return Reply::text(ReplyKind::NotRecognized, NOT_RECOGNIZED_MESSAGE);
            }
            Err(e) => {
                warn!(error = %e, "Expense extraction failed");
                return Reply::text(ReplyKind::NotRecognized, NOT_RECOGNIZED_MESSAGE);
            }
        };

        let valid = match draft.validate(self.settings.fallback_category) {
            Ok(valid) => valid,
            Err(e) => {
                info!(error = %e, "Rejected expense draft");
                return Reply::text(
                    ReplyKind::NotRecognized,
                    format!("{e}. {NOT_RECOGNIZED_MESSAGE}"),
                );
            }
        };

        match self
            .ledger
            .record_expense(user_id, valid, original.to_string())
            .await
        {
            Ok(recorded) => {
                let text = self.confirmation(&recorded);
                Reply {
                    expense: Some(recorded),
                    ..Reply::text(ReplyKind::ExpenseRecorded, text)
                }
            }
            Err(LedgerError::LimitExceeded {
                category,
                limit,
                new_total,
                ..
            }) => Reply::text(
                ReplyKind::ExpenseRejected,
                format!(
                    "⛔ Expense not recorded: it would bring {category} to {} this month, over the limit of {}.",
                    self.formatter.money(new_total),
                    self.formatter.money(limit)
                ),
            ),
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to record expense");
                Reply::text(ReplyKind::Failure, FAILURE_MESSAGE)
            }
        }
    }

    async fn handle_analytics(&self, user_id: UserId, text: &str) -> Reply {
        let period = PeriodResolver::resolve(text, self.ledger.now());

        let kind = match self.assistant.analytics_kind(text).await {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "Analytics type detection failed");
                AnalyticsKind::Summary
            }
        };

        let category = if kind == AnalyticsKind::Category {
            match self.assistant.query_category(text).await {
                Ok(category) => category,
                Err(e) => {
                    warn!(error = %e, "Category detection failed");
                    None
                }
            }
        } else {
            None
        };

        debug!(period = %period, kind = ?kind, category = ?category, "Building analytics report");

        match AnalyticsService::build(&self.ledger, user_id, period, kind, category).await {
            Ok(report) => Reply {
                text: self.formatter.render(&report),
                report: Some(report),
                ..Reply::text(ReplyKind::Analytics, String::new())
            },
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to build analytics report");
                Reply::text(ReplyKind::Failure, FAILURE_MESSAGE)
            }
        }
    }

    fn confirmation(&self, recorded: &RecordedExpense) -> String {
        let expense = &recorded.expense;
        let mut text = format!(
            "✅ Expense recorded\n\n• Amount: {}\n• Category: {}\n• Description: {}",
            self.formatter.money(expense.amount),
            expense.category,
            expense.description
        );

        if let Some(remaining) = recorded.check.remaining {
            if recorded.check.over_limit {
                let _ = write!(
                    text,
                    "\n\n⚠️ {} limit exceeded by {}",
                    expense.category,
                    self.formatter.money(-remaining)
                );
            } else {
                let _ = write!(
                    text,
                    "\n\n💰 Remaining in {} this month: {}",
                    expense.category,
                    self.formatter.money(remaining)
                );
            }
        }
        text
    }
}
