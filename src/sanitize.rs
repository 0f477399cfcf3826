//! Input sanitization for form fields
//!
//! Every submitted string passes through here before it is stored or scored.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static FORBIDDEN_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>"';]"#).unwrap());

/// Sanitize an optional form value; absent values become `""`
pub fn sanitize(text: Option<&str>) -> String {
    match text {
        Some(text) => sanitize_str(text),
        None => String::new(),
    }
}

/// Strip tags, drop `< > " ' ;` and trim surrounding whitespace
pub fn sanitize_str(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let without_tags = TAG_PATTERN.replace_all(text, "");
    let without_chars = FORBIDDEN_CHARS.replace_all(&without_tags, "");
    without_chars.trim().to_string()
}
