use review_core::{LoadError, Metadata};
use review_logging::review_warn;

use crate::csv_text::parse_records;

pub const FILENAME_COLUMN: &str = "filename";

/// One data row of the metadata table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub filename: String,
    pub values: Metadata,
}

/// Parses the metadata CSV. The first record names the columns; `filename`
/// is required and every other column is read as a number.
///
/// Short rows leave their missing columns as `None`, extra trailing fields
/// are ignored, and values that are not finite numbers become `None`. Rows
/// without a filename are skipped.
pub fn parse_metadata(text: &str) -> Result<Vec<MetadataRow>, LoadError> {
    let mut records = parse_records(text).into_iter();
    let header: Vec<String> = records
        .next()
        .ok_or_else(|| LoadError::Parse("missing header row".to_string()))?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    let filename_idx = header
        .iter()
        .position(|name| name == FILENAME_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn(FILENAME_COLUMN.to_string()))?;

    let mut rows = Vec::new();
    for (line_no, record) in records.enumerate() {
        let filename = record
            .get(filename_idx)
            .map(|value| value.trim())
            .unwrap_or_default();
        if filename.is_empty() {
            review_warn!("Skipping metadata row {} without a filename", line_no + 2);
            continue;
        }

        let values = header
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != filename_idx)
            .map(|(idx, name)| (name.clone(), record.get(idx).and_then(|v| parse_number(v))))
            .collect();
        rows.push(MetadataRow {
            filename: filename.to_string(),
            values,
        });
    }
    Ok(rows)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn values(pairs: &[(&str, Option<f64>)]) -> Metadata {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn numeric_columns_are_coerced() {
        let text = "filename,bend,rotate,vshift,angle,depth\n\
                    a.png,0.5,-10,3,45,1e2\n";
        let rows = parse_metadata(text).unwrap();
        assert_eq!(
            rows,
            vec![MetadataRow {
                filename: "a.png".to_string(),
                values: values(&[
                    ("angle", Some(45.0)),
                    ("bend", Some(0.5)),
                    ("depth", Some(100.0)),
                    ("rotate", Some(-10.0)),
                    ("vshift", Some(3.0)),
                ]),
            }]
        );
    }

    #[test]
    fn short_rows_and_bad_numbers_become_none() {
        let text = "filename,bend,rotate\nb.png,abc\nc.png,,NaN,extra\n\n";
        let rows = parse_metadata(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values, values(&[("bend", None), ("rotate", None)]));
        assert_eq!(rows[1].values, values(&[("bend", None), ("rotate", None)]));
    }

    #[test]
    fn filename_column_may_appear_anywhere() {
        let text = " bend , filename \n2, x.png \n";
        let rows = parse_metadata(text).unwrap();
        assert_eq!(rows[0].filename, "x.png");
        assert_eq!(rows[0].values, values(&[("bend", Some(2.0))]));
    }

    #[test]
    fn rows_without_filename_are_skipped() {
        let rows = parse_metadata("filename,bend\n,1\nz.png,2\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "z.png");
    }

    #[test]
    fn missing_filename_column_is_an_error() {
        assert_eq!(
            parse_metadata("name,bend\na.png,1\n"),
            Err(LoadError::MissingColumn("filename".to_string()))
        );
    }

    #[test]
    fn empty_text_is_a_parse_error() {
        assert!(matches!(parse_metadata("\n\n"), Err(LoadError::Parse(_))));
    }
}
