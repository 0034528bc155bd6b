//! Keyword search over the canonical table

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreResult;
use crate::model::{CanonicalTable, Record};

/// Projection returned for each matching record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: Option<u32>,
    pub part_title: Option<String>,
    pub authority: Option<String>,
    pub text: Option<String>,
}

impl From<&Record> for SearchHit {
    fn from(record: &Record) -> Self {
        Self {
            title: record.title,
            part_title: record.part_title.clone(),
            authority: record.authority.clone(),
            text: record.text.clone(),
        }
    }
}

/// Case-insensitive substring search with an optional exact title filter
pub struct SearchEngine<'a> {
    table: &'a CanonicalTable,
}

impl<'a> SearchEngine<'a> {
    pub fn new(table: &'a CanonicalTable) -> Self {
        Self { table }
    }

    /// Records whose text contains `query` (ignoring case), in table order
    ///
    /// Records without text never match. An empty query matches every record
    /// that has text. A title no record can carry (negative, or past `u32`)
    /// matches nothing.
    pub fn matching(
        &self,
        query: &str,
        title: Option<i64>,
    ) -> CoreResult<impl Iterator<Item = &'a Record> + 'a> {
        self.table.schema().require_text()?;

        let needle = query.to_lowercase();
        Ok(self.table.records().iter().filter(move |record| {
            if title.is_some() && record.title.map(i64::from) != title {
                return false;
            }
            record
                .text
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        }))
    }

    /// Projected search results
    pub fn search(&self, query: &str, title: Option<i64>) -> CoreResult<Vec<SearchHit>> {
        let hits: Vec<SearchHit> = self.matching(query, title)?.map(SearchHit::from).collect();
        debug!(
            "search query={:?} title={:?} -> {} hits",
            query,
            title,
            hits.len()
        );
        Ok(hits)
    }
}
