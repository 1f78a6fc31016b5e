use chrono::{DateTime, Utc};

use crate::label::sanitize_label;

/// Export file name: `image_review_<label>_<yyyy-MM-dd_HHmmss>.csv` (UTC).
pub fn export_filename(rater_label: &str, at: DateTime<Utc>) -> String {
    format!(
        "image_review_{}_{}.csv",
        sanitize_label(rater_label),
        at.format("%Y-%m-%d_%H%M%S")
    )
}
