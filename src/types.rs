//! Core data types for the feedback service
//!
//! Student and teacher feedback share one record shape. The kind only
//! matters at the presentation boundary (form field names, export labels),
//! so everything below is generic over [`FeedbackKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of fixed-choice questions on every form
pub const CLOSED_QUESTION_COUNT: usize = 10;

/// Number of free-text questions on every form
pub const OPEN_QUESTION_COUNT: usize = 10;

/// Polarity above this is labelled positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity below this is labelled negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Closed-ended answers in form order (`q1..q10`)
pub type ClosedAnswers = [String; CLOSED_QUESTION_COUNT];

/// Open-ended answers in form order (`open_q1..open_q10`)
pub type OpenAnswers = [String; OPEN_QUESTION_COUNT];

/// Which population a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Student,
    Teacher,
}

impl FeedbackKind {
    /// Both kinds, in dashboard order
    pub const ALL: [FeedbackKind; 2] = [FeedbackKind::Student, FeedbackKind::Teacher];

    /// Stable lowercase name, also used as the stored discriminator
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Student => "student",
            FeedbackKind::Teacher => "teacher",
        }
    }

    /// Plural form used in download routes (`/admin/download/students/csv`)
    pub fn plural(&self) -> &'static str {
        match self {
            FeedbackKind::Student => "students",
            FeedbackKind::Teacher => "teachers",
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "students" => Ok(FeedbackKind::Student),
            "teacher" | "teachers" => Ok(FeedbackKind::Teacher),
            other => Err(format!("unknown feedback kind: {}", other)),
        }
    }
}

/// Store-assigned record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(pub i64);

impl std::fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who submitted the feedback
///
/// `group` is the class for students and the subject for teachers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentInfo {
    pub name: String,
    pub group: String,
    pub email: String,
    pub phone: String,
}

impl RespondentInfo {
    /// Field names paired with values, in form order
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("name", self.name.as_str()),
            ("group", self.group.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
        ]
    }

    /// Names of the fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Three-way sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a polarity score. Exactly ±0.1 is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!("unknown sentiment label: {}", other)),
        }
    }
}

/// Sentiment of a respondent's combined open answers
///
/// The label is always derived from the polarity, so the three values are
/// constructed together and never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    /// Result for text with nothing to score
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    /// Build from raw scores, clamping to their ranges and deriving the label
    pub fn from_scores(polarity: f64, subjectivity: f64) -> Self {
        let polarity = polarity.clamp(-1.0, 1.0);
        Self {
            polarity,
            subjectivity: subjectivity.clamp(0.0, 1.0),
            label: SentimentLabel::from_polarity(polarity),
        }
    }
}

/// Raw form input, before sanitization
#[derive(Debug, Clone, Default)]
pub struct FeedbackSubmission {
    pub respondent: RespondentInfo,
    pub closed_answers: ClosedAnswers,
    pub open_answers: OpenAnswers,
}

/// A sanitized, scored record ready to be inserted
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub kind: FeedbackKind,
    pub respondent: RespondentInfo,
    pub closed_answers: ClosedAnswers,
    pub open_answers: OpenAnswers,
    pub sentiment: Sentiment,
}

/// A persisted feedback record. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub kind: FeedbackKind,
    pub respondent: RespondentInfo,
    pub closed_answers: ClosedAnswers,
    pub open_answers: OpenAnswers,
    /// Absent only for rows written outside this service
    pub sentiment: Option<Sentiment>,
    pub created_at: Option<DateTime<Utc>>,
}
