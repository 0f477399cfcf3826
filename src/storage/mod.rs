//! Storage layer for feedback records
//!
//! Records are append-only: the trait has no update or delete operation.

pub mod libsql;

use crate::error::Result;
use crate::types::{FeedbackId, FeedbackKind, FeedbackRecord, NewFeedback, SentimentLabel};
use async_trait::async_trait;

pub use self::libsql::{ConnectionMode, LibsqlStorage};

/// Storage backend trait defining all required operations
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persist a new record, returning it with its assigned id and timestamp
    async fn insert(&self, feedback: &NewFeedback) -> Result<FeedbackRecord>;

    /// Fetch one record by id
    async fn get(&self, id: FeedbackId) -> Result<Option<FeedbackRecord>>;

    /// All records of a kind in insertion order
    async fn list_all(&self, kind: FeedbackKind) -> Result<Vec<FeedbackRecord>>;

    /// Number of records of a kind
    async fn count(&self, kind: FeedbackKind) -> Result<usize>;

    /// Stored labels across both kinds; rows without sentiment are skipped
    async fn sentiment_labels(&self) -> Result<Vec<SentimentLabel>>;

    /// Raw stored values of closed question `question` (1-based) for a kind
    async fn closed_answer_values(&self, kind: FeedbackKind, question: usize)
        -> Result<Vec<String>>;
}
