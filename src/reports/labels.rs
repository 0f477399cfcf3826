//! Per-kind column labels and JSON keys for exports
//!
//! Stored rows are generic (`q1..q10`, `open_q1..open_q10`); these tables
//! give them their meaning for each kind.

use crate::error::{FeedbackError, Result};
use crate::types::{FeedbackKind, CLOSED_QUESTION_COUNT, OPEN_QUESTION_COUNT};

const STUDENT_CLOSED_LABELS: [&str; CLOSED_QUESTION_COUNT] = [
    "Satisfaction",
    "Internet Access",
    "Technical Issues",
    "Interactive",
    "Comfortable Asking",
    "Teaching Materials",
    "Assignments Manageable",
    "Preference",
    "Timely Feedback",
    "Recommend",
];

const TEACHER_CLOSED_LABELS: [&str; CLOSED_QUESTION_COUNT] = [
    "Effectiveness",
    "Resources Access",
    "Technical Issues",
    "Student Engagement",
    "Comfortable with Tools",
    "Student Participation",
    "Assessments Manageable",
    "Preference",
    "Provide Feedback",
    "Recommend",
];

const STUDENT_CLOSED_KEYS: [&str; CLOSED_QUESTION_COUNT] = [
    "satisfaction",
    "internet_access",
    "technical_issues",
    "interactive",
    "comfortable_asking",
    "teaching_materials",
    "assignments_manageable",
    "preference",
    "timely_feedback",
    "recommend",
];

const TEACHER_CLOSED_KEYS: [&str; CLOSED_QUESTION_COUNT] = [
    "effectiveness",
    "resources_access",
    "technical_issues",
    "student_engagement",
    "comfortable_with_tools",
    "student_participation",
    "assessments_manageable",
    "preference",
    "provide_feedback",
    "recommend",
];

/// Open question labels, shared by both kinds
pub const OPEN_LABELS: [&str; OPEN_QUESTION_COUNT] = [
    "Challenge 1",
    "Challenge 2",
    "Improvement 1",
    "Improvement 2",
    "Benefit 1",
    "Benefit 2",
    "Experience",
    "Support",
    "Additional Comments",
    "Future Suggestions",
];

/// Open question JSON keys, shared by both kinds
pub const OPEN_KEYS: [&str; OPEN_QUESTION_COUNT] = [
    "challenge_1",
    "challenge_2",
    "improvement_1",
    "improvement_2",
    "benefit_1",
    "benefit_2",
    "experience",
    "support",
    "additional_comments",
    "future_suggestions",
];

/// CSV headers for closed questions
pub fn closed_labels(kind: FeedbackKind) -> &'static [&'static str; CLOSED_QUESTION_COUNT] {
    match kind {
        FeedbackKind::Student => &STUDENT_CLOSED_LABELS,
        FeedbackKind::Teacher => &TEACHER_CLOSED_LABELS,
    }
}

/// JSON keys for closed questions
pub fn closed_keys(kind: FeedbackKind) -> &'static [&'static str; CLOSED_QUESTION_COUNT] {
    match kind {
        FeedbackKind::Student => &STUDENT_CLOSED_KEYS,
        FeedbackKind::Teacher => &TEACHER_CLOSED_KEYS,
    }
}

/// CSV header for the group column
pub fn group_label(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Student => "Class",
        FeedbackKind::Teacher => "Subject",
    }
}

/// JSON key for the group field
pub fn group_key(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Student => "class",
        FeedbackKind::Teacher => "subject",
    }
}

/// Resolve a closed question to its 1-based number
///
/// Accepts the JSON key (`satisfaction`), the form field (`q1`) or the bare
/// number (`1`).
pub fn closed_question_number(kind: FeedbackKind, field: &str) -> Result<usize> {
    let field = field.trim();

    if let Some(position) = closed_keys(kind).iter().position(|key| *key == field) {
        return Ok(position + 1);
    }

    let digits = field.strip_prefix('q').unwrap_or(field);
    match digits.parse::<usize>() {
        Ok(n) if (1..=CLOSED_QUESTION_COUNT).contains(&n) => Ok(n),
        _ => Err(FeedbackError::Validation(format!(
            "unknown {} question: {}",
            kind, field
        ))),
    }
}

/// Full CSV header row for a kind
pub fn csv_headers(kind: FeedbackKind) -> Vec<&'static str> {
    let mut headers = vec!["ID", "Name", group_label(kind), "Email", "Phone"];
    headers.extend(closed_labels(kind).iter());
    headers.extend(OPEN_LABELS.iter());
    headers.extend([
        "Sentiment Polarity",
        "Sentiment Subjectivity",
        "Sentiment Label",
        "Created At",
    ]);
    headers
}
