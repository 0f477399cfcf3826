//! Sentiment scoring for open-ended answers
//!
//! - `lexicon`: word polarity/subjectivity table with negations and intensifiers
//! - `analyzer`: combines a respondent's answers and produces a [`Sentiment`]
//!
//! [`Sentiment`]: crate::types::Sentiment

pub mod analyzer;
pub mod lexicon;

pub use analyzer::{ScoredWord, SentimentAnalyzer, TextScore};
pub use lexicon::{FeedbackLexicon, LexiconEntry};
