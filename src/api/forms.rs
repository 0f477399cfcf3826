//! Form field names and form → submission mapping

use crate::types::{FeedbackKind, FeedbackSubmission, RespondentInfo};
use std::collections::HashMap;

/// Name of a respondent field on a kind's form, e.g. `student_class`
pub fn respondent_field(kind: FeedbackKind, field: &str) -> String {
    let field = match (kind, field) {
        (FeedbackKind::Student, "group") => "class",
        (FeedbackKind::Teacher, "group") => "subject",
        (_, other) => other,
    };
    format!("{}_{}", kind.as_str(), field)
}

/// Name of closed question `n` (1-based)
pub fn closed_field(n: usize) -> String {
    format!("q{}", n)
}

/// Name of open question `n` (1-based)
pub fn open_field(n: usize) -> String {
    format!("open_q{}", n)
}

/// Build a raw submission from posted form fields
///
/// Absent fields become empty strings; validation happens later.
pub fn submission_from_form(kind: FeedbackKind, form: &HashMap<String, String>) -> FeedbackSubmission {
    let value = |name: String| form.get(&name).cloned().unwrap_or_default();

    FeedbackSubmission {
        respondent: RespondentInfo {
            name: value(respondent_field(kind, "name")),
            group: value(respondent_field(kind, "group")),
            email: value(respondent_field(kind, "email")),
            phone: value(respondent_field(kind, "phone")),
        },
        closed_answers: std::array::from_fn(|i| value(closed_field(i + 1))),
        open_answers: std::array::from_fn(|i| value(open_field(i + 1))),
    }
}
