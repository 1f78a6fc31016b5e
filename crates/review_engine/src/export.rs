use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use review_core::DecisionRecord;
use review_logging::review_info;

use crate::csv_text::render_export_csv;
use crate::filename::export_filename;
use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("no decisions to export")]
    Empty,
    #[error("this sink does not export files")]
    Unsupported,
    #[error("export task failed: {0}")]
    Worker(String),
}

/// Writes `records` as `image_review_<label>_<timestamp>.csv` into `output_dir`.
pub fn export_decisions(
    output_dir: &Path,
    rater_label: &str,
    records: &[DecisionRecord],
    at: DateTime<Utc>,
) -> Result<ExportSummary, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let content = render_export_csv(rater_label, records);
    let filename = export_filename(rater_label, at);
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let output_path = writer.write(&filename, content.as_bytes())?;
    review_info!(
        "Exported {} decisions to {}",
        records.len(),
        output_path.display()
    );

    Ok(ExportSummary {
        row_count: records.len(),
        output_path,
    })
}
