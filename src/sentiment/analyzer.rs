//! Sentiment analyzer
//!
//! Scores a respondent's combined open answers. Polarity is the sum of the
//! matched word scores squashed into (-1, 1) with `s / sqrt(s^2 + alpha)`,
//! so every additional positive word pushes it up and every negative word
//! pushes it down. Subjectivity is the mean subjectivity of matched words.

use crate::error::{FeedbackError, Result};
use crate::sanitize::sanitize_str;
use crate::sentiment::lexicon::FeedbackLexicon;
use crate::types::Sentiment;
use tracing::debug;

/// Squashing constant for the polarity sum
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Negated words keep this share of their (flipped) polarity
const NEGATION_DAMPING: f64 = 0.5;

/// A word that contributed to the score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub word: String,
    pub polarity: f64,
}

/// Detailed scoring of one text
#[derive(Debug, Clone, Default)]
pub struct TextScore {
    /// Normalized polarity in (-1, 1)
    pub polarity: f64,
    /// Mean subjectivity of matched words in [0, 1]
    pub subjectivity: f64,
    /// Raw sum before normalization
    pub raw_sum: f64,
    pub matched: Vec<ScoredWord>,
}

/// Lexicon-based sentiment analyzer
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: FeedbackLexicon,
    /// How many tokens after a negation it still applies to
    negation_window: usize,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: FeedbackLexicon::new(),
            negation_window: 3,
        }
    }

    /// Use a custom lexicon
    pub fn with_lexicon(mut self, lexicon: FeedbackLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Set the negation window
    pub fn with_negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    /// Join the non-empty answers with single spaces and sanitize the result
    pub fn combine<S: AsRef<str>>(open_answers: &[S]) -> String {
        let joined = open_answers
            .iter()
            .map(|answer| answer.as_ref())
            .filter(|answer| !answer.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        sanitize_str(&joined)
    }

    /// Score a respondent's open answers
    ///
    /// Empty input yields the neutral-zero result without scoring.
    pub fn analyze<S: AsRef<str>>(&self, open_answers: &[S]) -> Result<Sentiment> {
        let combined = Self::combine(open_answers);
        if combined.is_empty() {
            return Ok(Sentiment::neutral());
        }

        let score = self.score_text(&combined);
        if !score.polarity.is_finite() || !score.subjectivity.is_finite() {
            return Err(FeedbackError::Sentiment(format!(
                "non-finite score (polarity={}, subjectivity={})",
                score.polarity, score.subjectivity
            )));
        }

        debug!(
            "Scored {} words: polarity={:.3}, subjectivity={:.3}",
            score.matched.len(),
            score.polarity,
            score.subjectivity
        );

        Ok(Sentiment::from_scores(score.polarity, score.subjectivity))
    }

    /// Score a single text
    pub fn score_text(&self, text: &str) -> TextScore {
        let mut raw_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = Vec::new();

        let mut modifier = 1.0;
        let mut negation_remaining = 0usize;

        for token in tokenize(text) {
            if self.lexicon.is_negation(&token) {
                negation_remaining = self.negation_window;
                continue;
            }

            if let Some(multiplier) = self.lexicon.get_intensifier(&token) {
                modifier = multiplier;
                continue;
            }

            match self.lexicon.get_entry(&token) {
                Some(entry) => {
                    let mut polarity = entry.polarity * modifier;
                    if negation_remaining > 0 {
                        polarity = -polarity * NEGATION_DAMPING;
                        negation_remaining = 0;
                    }

                    raw_sum += polarity;
                    subjectivity_sum += (entry.subjectivity * modifier).min(1.0);
                    matched.push(ScoredWord {
                        word: token,
                        polarity,
                    });
                }
                None => {
                    negation_remaining = negation_remaining.saturating_sub(1);
                }
            }

            modifier = 1.0;
        }

        let polarity = if matched.is_empty() {
            0.0
        } else {
            raw_sum / (raw_sum * raw_sum + NORMALIZATION_ALPHA).sqrt()
        };

        let subjectivity = if matched.is_empty() {
            0.0
        } else {
            (subjectivity_sum / matched.len() as f64).clamp(0.0, 1.0)
        };

        TextScore {
            polarity,
            subjectivity,
            raw_sum,
            matched,
        }
    }
}

/// Lowercase alphanumeric tokens
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
}
