//! Minimal CSV reading and writing.
//!
//! Reading splits text into records of raw fields, honouring double-quoted
//! fields (which may contain commas, `""` escapes and line breaks). Writing
//! quotes only the fields that need it.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use review_core::DecisionRecord;

pub const EXPORT_HEADER: &str = "timestamp,username,image,decision";

/// Splits `text` into records. Fields are returned untrimmed; records whose
/// fields are all blank are dropped.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_was_quoted => {
                in_quotes = true;
                field_was_quoted = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_was_quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                record.push(std::mem::take(&mut field));
                field_was_quoted = false;
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || field_was_quoted || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records.retain(|record| record.iter().any(|field| !field.trim().is_empty()));
    records
}

/// Quotes `value` when it contains a comma, quote or line break.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-01-01T00:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders the export file: header plus one row per record, `\n` line endings.
pub fn render_export_csv(rater_label: &str, records: &[DecisionRecord]) -> String {
    let mut out = String::with_capacity(EXPORT_HEADER.len() + 1 + records.len() * 64);
    out.push_str(EXPORT_HEADER);
    out.push('\n');
    for record in records {
        let row = [
            format_timestamp(record.recorded_at),
            escape_field(rater_label).into_owned(),
            escape_field(record.item_id.as_str()).into_owned(),
            record.decision.export_label().to_string(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
