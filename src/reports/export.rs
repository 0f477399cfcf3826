//! CSV and JSON export bundles

use crate::error::{FeedbackError, Result};
use crate::reports::labels::{closed_keys, csv_headers, group_key, OPEN_KEYS};
use crate::storage::FeedbackStore;
use crate::types::{FeedbackKind, FeedbackRecord};
use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use std::str::FromStr;

/// `Created At` column format
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(FeedbackError::InvalidValue(format!(
                "unsupported export format: {} (expected csv or json)",
                other
            ))),
        }
    }
}

/// Download filename, e.g. `student_feedback_20240131_154500.csv`
pub fn export_filename(kind: FeedbackKind, format: ExportFormat, now: &NaiveDateTime) -> String {
    format!(
        "{}_feedback_{}.{}",
        kind.as_str(),
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Export every record of a kind from the store
pub async fn export_kind(
    store: &dyn FeedbackStore,
    kind: FeedbackKind,
    format: ExportFormat,
) -> Result<Vec<u8>> {
    let records = store.list_all(kind).await?;
    export_records(kind, &records, format)
}

/// Serialize records in the given order
pub fn export_records(
    kind: FeedbackKind,
    records: &[FeedbackRecord],
    format: ExportFormat,
) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => to_csv(kind, records),
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(&to_json(kind, records))?),
    }
}

/// CSV with a header row and one row per record
pub fn to_csv(kind: FeedbackKind, records: &[FeedbackRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(csv_headers(kind))?;

    for record in records {
        let mut row = vec![
            record.id.to_string(),
            record.respondent.name.clone(),
            record.respondent.group.clone(),
            record.respondent.email.clone(),
            record.respondent.phone.clone(),
        ];
        row.extend(record.closed_answers.iter().cloned());
        row.extend(record.open_answers.iter().cloned());

        match &record.sentiment {
            Some(sentiment) => row.extend([
                format!("{:?}", sentiment.polarity),
                format!("{:?}", sentiment.subjectivity),
                sentiment.label.to_string(),
            ]),
            None => row.extend([String::new(), String::new(), String::new()]),
        }

        row.push(
            record
                .created_at
                .map(|ts| ts.format(CSV_TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        );

        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| FeedbackError::Io(e.into_error()))
}

/// JSON array of nested objects, keys in a fixed order
pub fn to_json(kind: FeedbackKind, records: &[FeedbackRecord]) -> Value {
    Value::Array(records.iter().map(|record| record_json(kind, record)).collect())
}

fn record_json(kind: FeedbackKind, record: &FeedbackRecord) -> Value {
    let mut personal_info = Map::new();
    personal_info.insert("name".into(), record.respondent.name.clone().into());
    personal_info.insert(group_key(kind).into(), record.respondent.group.clone().into());
    personal_info.insert("email".into(), record.respondent.email.clone().into());
    personal_info.insert("phone".into(), record.respondent.phone.clone().into());

    let closed_questions: Map<String, Value> = closed_keys(kind)
        .iter()
        .zip(record.closed_answers.iter())
        .map(|(key, answer)| (key.to_string(), Value::String(answer.clone())))
        .collect();

    let open_questions: Map<String, Value> = OPEN_KEYS
        .iter()
        .zip(record.open_answers.iter())
        .map(|(key, answer)| (key.to_string(), Value::String(answer.clone())))
        .collect();

    let mut sentiment_analysis = Map::new();
    match &record.sentiment {
        Some(sentiment) => {
            sentiment_analysis.insert("polarity".into(), sentiment.polarity.into());
            sentiment_analysis.insert("subjectivity".into(), sentiment.subjectivity.into());
            sentiment_analysis.insert("label".into(), sentiment.label.as_str().into());
        }
        None => {
            for key in ["polarity", "subjectivity", "label"] {
                sentiment_analysis.insert(key.into(), Value::Null);
            }
        }
    }

    let mut object = Map::new();
    object.insert("id".into(), record.id.0.into());
    object.insert("personal_info".into(), Value::Object(personal_info));
    object.insert("closed_questions".into(), Value::Object(closed_questions));
    object.insert("open_questions".into(), Value::Object(open_questions));
    object.insert("sentiment_analysis".into(), Value::Object(sentiment_analysis));
    object.insert(
        "created_at".into(),
        record
            .created_at
            .map(|ts| Value::String(ts.to_rfc3339()))
            .unwrap_or(Value::Null),
    );
    Value::Object(object)
}
