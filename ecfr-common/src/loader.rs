//! Input table loading
//!
//! Reads the on-disk corpus into a [`RawTable`] and hands it to the
//! normalizer. CSV with a header row is the primary format; JSON Lines is
//! accepted for `.jsonl` / `.ndjson` files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::model::{CanonicalTable, RawTable};
use crate::normalize::normalize;
use crate::{Error, Result};

/// On-disk format of the input table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    JsonLines,
}

impl TableFormat {
    /// Pick a format from the file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jsonl") | Some("ndjson") => TableFormat::JsonLines,
            _ => TableFormat::Csv,
        }
    }
}

/// Load and normalize the corpus at `path`
///
/// Called once at startup. The returned table is complete; nothing observes
/// a partially-normalized table.
pub fn load_table(path: &Path) -> Result<CanonicalTable> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Data file not found: {}",
            path.display()
        )));
    }

    let format = TableFormat::from_path(path);
    info!("Loading {:?} table from {}", format, path.display());

    let file = File::open(path)?;
    let raw = match format {
        TableFormat::Csv => read_raw_csv(file)?,
        TableFormat::JsonLines => read_raw_jsonl(BufReader::new(file))?,
    };

    Ok(normalize(raw))
}

/// Read a headered CSV table; empty cells become absent
pub fn read_raw_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut raw = RawTable::new(headers.iter().map(|h| h.trim()));

    for result in csv_reader.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        raw.push_row(row);
    }

    Ok(raw)
}

/// Read one JSON object per line; columns are the union of keys seen
///
/// `null` becomes an absent cell, numbers and booleans are kept in their
/// textual form, blank lines are skipped.
pub fn read_raw_jsonl<R: BufRead>(reader: R) -> Result<RawTable> {
    let mut raw = RawTable::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let line_no = idx + 1;
        let value: Value =
            serde_json::from_str(&line).map_err(|source| Error::Json { line: line_no, source })?;
        let Value::Object(map) = value else {
            return Err(Error::InvalidInput(format!(
                "line {} is not a JSON object",
                line_no
            )));
        };

        let mut row = vec![None; raw.columns().len()];
        for (key, value) in map {
            let col = raw.ensure_column(&key);
            if col >= row.len() {
                row.resize(col + 1, None);
            }
            row[col] = json_cell(value);
        }
        raw.push_row(row);
    }

    Ok(raw)
}

fn json_cell(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("a.csv")), TableFormat::Csv);
        assert_eq!(
            TableFormat::from_path(Path::new("a.JSONL")),
            TableFormat::JsonLines
        );
        assert_eq!(
            TableFormat::from_path(Path::new("a.ndjson")),
            TableFormat::JsonLines
        );
        assert_eq!(TableFormat::from_path(Path::new("noext")), TableFormat::Csv);
    }

    #[test]
    fn test_csv_empty_cells_are_absent() {
        let data = "title,text,authority\n7,The cat sat.,\n,Dogs run.,AGX\n";
        let raw = read_raw_csv(data.as_bytes()).unwrap();

        assert_eq!(raw.columns(), ["title", "text", "authority"]);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.rows()[0][2], None);
        assert_eq!(raw.rows()[1][0], None);
        assert_eq!(raw.rows()[1][2].as_deref(), Some("AGX"));
    }

    #[test]
    fn test_csv_quoted_multiline_text() {
        let data = "text\n\"line one\nline two, with comma\"\n";
        let raw = read_raw_csv(data.as_bytes()).unwrap();
        assert_eq!(
            raw.rows()[0][0].as_deref(),
            Some("line one\nline two, with comma")
        );
    }

    #[test]
    fn test_csv_short_row_is_padded() {
        let data = "a,b,c\n1\n";
        let raw = read_raw_csv(data.as_bytes()).unwrap();
        assert_eq!(raw.rows()[0], vec![Some("1".to_string()), None, None]);
    }

    #[test]
    fn test_jsonl_union_of_keys() {
        let data = "{\"text\": \"a b\", \"title\": 3}\n\n{\"authority\": \"X\", \"text\": null}\n";
        let raw = read_raw_jsonl(Cursor::new(data)).unwrap();

        assert_eq!(raw.columns(), ["text", "title", "authority"]);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.rows()[0][1].as_deref(), Some("3"));
        assert_eq!(raw.rows()[0][2], None);
        assert_eq!(raw.rows()[1][0], None);
        assert_eq!(raw.rows()[1][2].as_deref(), Some("X"));
    }

    #[test]
    fn test_jsonl_malformed_line_reports_line_number() {
        let data = "{\"text\": \"ok\"}\n{not json\n";
        let err = read_raw_jsonl(Cursor::new(data)).unwrap_err();
        match err {
            Error::Json { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_jsonl_non_object_rejected() {
        let data = "[1, 2]\n";
        let err = read_raw_jsonl(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("Data file not found"));
    }
}
