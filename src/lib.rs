//! EduFeedback - online learning feedback collection and analysis
//!
//! Students and teachers submit feedback through web forms; open-ended
//! answers are scored for sentiment and stored alongside the closed answers.
//! Administrators see aggregate charts and download CSV/JSON exports.
//!
//! # Architecture
//!
//! - **Types**: Core data structures (FeedbackRecord, Sentiment, etc.)
//! - **Sanitize / Sentiment**: input cleanup and lexicon-based scoring
//! - **Storage**: libSQL record store (append-only)
//! - **Feedback**: submission pipeline tying the above together
//! - **Reports**: distributions, PNG charts, exports
//! - **API**: axum HTTP interface
//!
//! # Example
//!
//! ```ignore
//! use edufeedback_core::{FeedbackKind, FeedbackService, FeedbackSubmission, LibsqlStorage};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> edufeedback_core::Result<()> {
//!     let storage = LibsqlStorage::in_memory().await?;
//!     let service = FeedbackService::new(Arc::new(storage));
//!
//!     let mut submission = FeedbackSubmission::default();
//!     submission.respondent.name = "Ada".into();
//!     // ... fill in the remaining fields
//!
//!     let record = service.create(FeedbackKind::Student, &submission).await?;
//!     println!("stored #{} ({:?})", record.id, record.sentiment);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod feedback;
pub mod reports;
pub mod sanitize;
pub mod sentiment;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{FeedbackError, Result};
pub use feedback::FeedbackService;
pub use sanitize::{sanitize, sanitize_str};
pub use sentiment::SentimentAnalyzer;
pub use storage::{ConnectionMode, FeedbackStore, LibsqlStorage};
pub use types::{
    FeedbackId, FeedbackKind, FeedbackRecord, FeedbackSubmission, NewFeedback, RespondentInfo,
    Sentiment, SentimentLabel,
};
