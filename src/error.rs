//! Error types for the feedback service
//!
//! This module provides error handling using thiserror for structured error
//! definitions and anyhow for propagation at the binary edge.

use thiserror::Error;

/// Main error type for feedback operations
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// A required respondent field was empty after sanitization
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// Sentiment scoring produced an unusable result
    #[error("Sentiment error: {0}")]
    Sentiment(String),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored or user-supplied value could not be interpreted
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for feedback operations
pub type Result<T> = std::result::Result<T, FeedbackError>;

impl FeedbackError {
    /// Whether the caller should re-prompt the respondent instead of failing
    pub fn is_validation(&self) -> bool {
        matches!(self, FeedbackError::Validation(_))
    }
}

impl From<libsql::Error> for FeedbackError {
    fn from(err: libsql::Error) -> Self {
        FeedbackError::Database(err.to_string())
    }
}

impl From<image::ImageError> for FeedbackError {
    fn from(err: image::ImageError) -> Self {
        FeedbackError::Chart(err.to_string())
    }
}

/// Convert anyhow::Error to FeedbackError
impl From<anyhow::Error> for FeedbackError {
    fn from(err: anyhow::Error) -> Self {
        FeedbackError::Other(err.to_string())
    }
}
