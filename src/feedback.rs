//! Feedback submission pipeline
//!
//! sanitize every field → validate respondent info → score open answers →
//! single insert. Nothing is written when validation or scoring fails.

use crate::error::{FeedbackError, Result};
use crate::sanitize::sanitize_str;
use crate::sentiment::SentimentAnalyzer;
use crate::storage::FeedbackStore;
use crate::types::{
    FeedbackKind, FeedbackRecord, FeedbackSubmission, NewFeedback, RespondentInfo,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Message shown to respondents who left a required field blank
pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required!";

/// Creates and reads feedback records
#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn FeedbackStore>,
    analyzer: Arc<SentimentAnalyzer>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self {
            store,
            analyzer: Arc::new(SentimentAnalyzer::new()),
        }
    }

    /// Use a custom analyzer
    pub fn with_analyzer(mut self, analyzer: SentimentAnalyzer) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    /// Underlying store, for read-side reporting
    pub fn store(&self) -> &Arc<dyn FeedbackStore> {
        &self.store
    }

    /// Sanitize, validate and score a submission without touching the store
    pub fn prepare(&self, kind: FeedbackKind, submission: &FeedbackSubmission) -> Result<NewFeedback> {
        let respondent = RespondentInfo {
            name: sanitize_str(&submission.respondent.name),
            group: sanitize_str(&submission.respondent.group),
            email: sanitize_str(&submission.respondent.email),
            phone: sanitize_str(&submission.respondent.phone),
        };

        let missing = respondent.missing_fields();
        if !missing.is_empty() {
            debug!("Rejected {} submission, missing: {:?}", kind, missing);
            return Err(FeedbackError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let closed_answers = submission
            .closed_answers
            .each_ref()
            .map(|answer| sanitize_str(answer));
        let open_answers = submission
            .open_answers
            .each_ref()
            .map(|answer| sanitize_str(answer));

        let sentiment = self.analyzer.analyze(&open_answers)?;

        Ok(NewFeedback {
            kind,
            respondent,
            closed_answers,
            open_answers,
            sentiment,
        })
    }

    /// Create and persist a record
    pub async fn create(
        &self,
        kind: FeedbackKind,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackRecord> {
        let feedback = self.prepare(kind, submission)?;
        let record = self.store.insert(&feedback).await?;

        info!(
            "Stored {} feedback {} (sentiment: {})",
            kind, record.id, feedback.sentiment.label
        );

        Ok(record)
    }

    /// All records of a kind in insertion order
    pub async fn list_all(&self, kind: FeedbackKind) -> Result<Vec<FeedbackRecord>> {
        self.store.list_all(kind).await
    }

    /// Number of records of a kind
    pub async fn count(&self, kind: FeedbackKind) -> Result<usize> {
        self.store.count(kind).await
    }
}
