//! Read-side reporting: aggregates, charts and export bundles
//!
//! - `aggregate`: sentiment and closed-answer distributions, dashboard stats
//! - `chart`: PNG bar charts
//! - `export`: CSV/JSON downloads
//! - `labels`: per-kind headers and keys

pub mod aggregate;
pub mod chart;
pub mod export;
pub mod labels;

pub use aggregate::{closed_answer_distribution, sentiment_distribution, DashboardStats};
pub use chart::{render_bar_chart, satisfaction_chart, sentiment_chart};
pub use export::{export_filename, export_kind, export_records, ExportFormat};
