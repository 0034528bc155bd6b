//! Canonical table model
//!
//! The canonical table is built once by [`crate::normalize::normalize`] and is
//! never mutated afterwards. Engines borrow it; the HTTP layer shares it
//! behind an `Arc`.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// One regulation text chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// CFR title number, absent when neither read nor derivable
    pub title: Option<u32>,
    /// Part/subsection label
    pub part_title: Option<String>,
    /// Legal authority citation
    pub authority: Option<String>,
    /// Chunk body
    pub text: Option<String>,
    /// Whitespace-token count of `text`, read from input or derived
    pub word_count: u64,
    /// Original filename the chunk was extracted from
    pub source_file: Option<String>,
}

/// How a canonical column was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrigin {
    /// Taken from the input table
    Read,
    /// Computed by the normalizer
    Derived,
}

/// Column presence recorded by the normalizer
///
/// This is the only place downstream code learns which columns the input
/// actually had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// `text` column present (directly or via the `part_text` alias)
    pub has_text: bool,
    /// `text` came from a `part_text` column
    pub text_from_alias: bool,
    pub has_authority: bool,
    pub has_part_title: bool,
    pub has_source_file: bool,
    pub title_origin: ColumnOrigin,
    pub word_count_origin: ColumnOrigin,
}

impl Schema {
    /// Fail with [`CoreError::MissingColumn`] unless the input had a text column
    pub fn require_text(&self) -> CoreResult<()> {
        if self.has_text {
            Ok(())
        } else {
            Err(CoreError::MissingColumn("text"))
        }
    }

    /// Fail with [`CoreError::MissingColumn`] unless the input had an authority column
    pub fn require_authority(&self) -> CoreResult<()> {
        if self.has_authority {
            Ok(())
        } else {
            Err(CoreError::MissingColumn("authority"))
        }
    }
}

/// Immutable, normalized record set shared by all engines
#[derive(Debug, Clone)]
pub struct CanonicalTable {
    records: Vec<Record>,
    schema: Schema,
}

impl CanonicalTable {
    pub(crate) fn new(records: Vec<Record>, schema: Schema) -> Self {
        Self { records, schema }
    }

    /// Records in input order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `word_count` over every record
    pub fn total_word_count(&self) -> u64 {
        self.records.iter().map(|r| r.word_count).sum()
    }
}

/// Loosely-structured input table: ordered column names and optional cells
///
/// Produced by the loaders in [`crate::loader`]; consumed by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create an empty table with the given header
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with absent cells and dropping
    /// cells beyond the header width
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Add a column (filled with absent cells) if not already present,
    /// returning its index
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        self.columns.len() - 1
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<Option<String>>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut raw = RawTable::new(["a", "b", "c"]);
        raw.push_row(vec![Some("1".to_string())]);
        assert_eq!(raw.rows()[0], vec![Some("1".to_string()), None, None]);
    }

    #[test]
    fn test_push_row_truncates_long_rows() {
        let mut raw = RawTable::new(["a"]);
        raw.push_row(vec![Some("1".to_string()), Some("2".to_string())]);
        assert_eq!(raw.rows()[0].len(), 1);
    }

    #[test]
    fn test_ensure_column_backfills_existing_rows() {
        let mut raw = RawTable::new(["a"]);
        raw.push_row(vec![Some("1".to_string())]);
        let idx = raw.ensure_column("b");
        assert_eq!(idx, 1);
        assert_eq!(raw.rows()[0], vec![Some("1".to_string()), None]);
        // Existing column is reused
        assert_eq!(raw.ensure_column("a"), 0);
    }

    #[test]
    fn test_schema_requirements() {
        let schema = Schema {
            has_text: true,
            text_from_alias: false,
            has_authority: false,
            has_part_title: false,
            has_source_file: false,
            title_origin: ColumnOrigin::Derived,
            word_count_origin: ColumnOrigin::Derived,
        };
        assert!(schema.require_text().is_ok());
        assert_eq!(
            schema.require_authority(),
            Err(CoreError::MissingColumn("authority"))
        );
    }
}
