//! Feedback export command

use edufeedback_core::{
    error::Result,
    reports::{export_kind, ExportFormat},
    FeedbackKind, FeedbackStore,
};
use std::{io::Write, path::PathBuf};
use tracing::debug;

use super::helpers::open_storage;

/// Handle export command
pub async fn handle(
    kind: String,
    format: String,
    output: Option<String>,
    db_path: String,
) -> Result<()> {
    let kind: FeedbackKind = kind
        .parse()
        .map_err(edufeedback_core::FeedbackError::InvalidValue)?;
    let format: ExportFormat = format.parse()?;

    match &output {
        Some(path) => debug!("Exporting {} feedback to {}...", kind, path),
        None => debug!("Exporting {} feedback to stdout...", kind),
    }

    // Export never creates a database
    let storage = open_storage(&db_path, false).await?;
    let count = storage.count(kind).await?;
    let bytes = export_kind(&storage, kind, format).await?;

    match output {
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&bytes)?;
            if format == ExportFormat::Json {
                handle.write_all(b"\n")?;
            }
        }
        Some(path) => {
            let output_path = PathBuf::from(path);
            std::fs::write(&output_path, &bytes)?;
            eprintln!(
                "Exported {} {} records to {}",
                count,
                kind,
                output_path.display()
            );
        }
    }

    Ok(())
}
