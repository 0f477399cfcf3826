//! HTML pages
//!
//! Plain server-rendered markup; every interpolated value goes through
//! [`escape_html`].

use crate::api::forms::{closed_field, open_field, respondent_field};
use crate::reports::labels::{closed_labels, group_label, OPEN_LABELS};
use crate::reports::DashboardStats;
use crate::types::FeedbackKind;

const STYLE: &str = "body{font-family:sans-serif;max-width:760px;margin:2em auto;padding:0 1em;color:#212529}\
label{display:block;margin-top:.8em;font-weight:bold}\
input,select,textarea{width:100%;padding:.4em;box-sizing:border-box}\
.error{background:#f8d7da;color:#721c24;padding:.6em;border-radius:4px}\
.stats{display:flex;gap:2em}.stats div{font-size:1.4em}\
img{max-width:100%}";

const SATISFACTION_CHOICES: [&str; 5] = [
    "Very Satisfied",
    "Satisfied",
    "Neutral",
    "Dissatisfied",
    "Very Dissatisfied",
];
const PREFERENCE_CHOICES: [&str; 3] = ["Online", "In-person", "Hybrid"];
const FREQUENCY_CHOICES: [&str; 3] = ["Yes", "Sometimes", "No"];

/// Escape text for element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body,
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!("<p class=\"error\">{}</p>\n", escape_html(message)))
        .unwrap_or_default()
}

fn kind_title(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Student => "Student",
        FeedbackKind::Teacher => "Teacher",
    }
}

/// Landing page
pub fn index() -> String {
    layout(
        "Online Learning Feedback",
        "<h1>Online Learning Feedback</h1>\n\
         <p>Tell us how online learning is going.</p>\n\
         <ul>\n\
         <li><a href=\"/student_feedback\">Student feedback form</a></li>\n\
         <li><a href=\"/teacher_feedback\">Teacher feedback form</a></li>\n\
         <li><a href=\"/admin\">Administration</a></li>\n\
         </ul>",
    )
}

fn choices_for(question: usize) -> &'static [&'static str] {
    match question {
        1 => &SATISFACTION_CHOICES,
        8 => &PREFERENCE_CHOICES,
        _ => &FREQUENCY_CHOICES,
    }
}

/// Feedback form for a kind, optionally with an error banner
pub fn feedback_form(kind: FeedbackKind, error: Option<&str>) -> String {
    let mut body = format!(
        "<h1>{} Feedback</h1>\n{}<form method=\"post\" action=\"/{}_feedback\">\n",
        kind_title(kind),
        error_banner(error),
        kind.as_str()
    );

    for (field, label, input_type) in [
        ("name", "Name", "text"),
        ("group", group_label(kind), "text"),
        ("email", "Email", "email"),
        ("phone", "Phone", "tel"),
    ] {
        let name = respondent_field(kind, field);
        body.push_str(&format!(
            "<label for=\"{name}\">{label}</label>\n<input id=\"{name}\" name=\"{name}\" type=\"{input_type}\" required>\n",
        ));
    }

    for (index, label) in closed_labels(kind).iter().enumerate() {
        let name = closed_field(index + 1);
        body.push_str(&format!("<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\n"));
        for choice in choices_for(index + 1) {
            body.push_str(&format!("<option>{}</option>\n", choice));
        }
        body.push_str("</select>\n");
    }

    for (index, label) in OPEN_LABELS.iter().enumerate() {
        let name = open_field(index + 1);
        body.push_str(&format!(
            "<label for=\"{name}\">{label}</label>\n<textarea id=\"{name}\" name=\"{name}\" rows=\"2\"></textarea>\n",
        ));
    }

    body.push_str("<p><button type=\"submit\">Submit feedback</button></p>\n</form>");
    layout(&format!("{} Feedback", kind_title(kind)), &body)
}

/// Confirmation page after a successful submission
pub fn thank_you(kind: FeedbackKind, name: &str) -> String {
    layout(
        "Thank You",
        &format!(
            "<h1>Thank you, {}!</h1>\n<p>Your {} feedback has been recorded.</p>\n<p><a href=\"/\">Back to home</a></p>",
            escape_html(name),
            kind.as_str()
        ),
    )
}

/// Admin login page
pub fn admin_login(error: Option<&str>) -> String {
    layout(
        "Admin Login",
        &format!(
            "<h1>Admin Login</h1>\n{}<form method=\"post\" action=\"/admin\">\n\
             <label for=\"admin_password\">Password</label>\n\
             <input id=\"admin_password\" name=\"admin_password\" type=\"password\" required>\n\
             <p><button type=\"submit\">Log in</button></p>\n</form>",
            error_banner(error)
        ),
    )
}

fn chart_section(title: &str, png_base64: Option<&str>) -> String {
    match png_base64 {
        Some(data) => format!(
            "<h2>{}</h2>\n<img alt=\"{}\" src=\"data:image/png;base64,{}\">\n",
            escape_html(title),
            escape_html(title),
            data
        ),
        None => format!("<h2>{}</h2>\n<p>No data to display yet.</p>\n", escape_html(title)),
    }
}

/// Admin dashboard with counts, charts and download links
pub fn dashboard(
    stats: &DashboardStats,
    sentiment_png: Option<&str>,
    satisfaction_png: Option<&str>,
) -> String {
    let mut body = format!(
        "<h1>Feedback Dashboard</h1>\n<p><a href=\"/admin/logout\">Log out</a></p>\n\
         <div class=\"stats\"><div>Students: <strong>{}</strong></div>\
         <div>Teachers: <strong>{}</strong></div></div>\n",
        stats.student_count, stats.teacher_count
    );

    body.push_str(&chart_section("Overall Sentiment Distribution", sentiment_png));
    body.push_str(&chart_section("Student Satisfaction Levels", satisfaction_png));

    body.push_str("<h2>Downloads</h2>\n<ul>\n");
    for kind in FeedbackKind::ALL {
        for format in ["csv", "json"] {
            body.push_str(&format!(
                "<li><a href=\"/admin/download/{}/{}\">{} feedback ({})</a></li>\n",
                kind.plural(),
                format,
                kind_title(kind),
                format.to_uppercase()
            ));
        }
    }
    body.push_str("</ul>");

    layout("Feedback Dashboard", &body)
}
