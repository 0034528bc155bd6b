//! Grouped statistics over the canonical table
//!
//! Every aggregation is recomputed per call. Groups are collected in
//! ascending key order and then stably sorted by their aggregate, so ties
//! come out in the same order every time.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreResult;
use crate::model::{CanonicalTable, Record};
use crate::readability::flesch_kincaid_grade;

/// Summed word count for one title (`None` collects untitled records)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleWordCount {
    pub title: Option<u32>,
    pub word_count: u64,
}

/// Summed word count for one authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityWordCount {
    pub authority: String,
    pub word_count: u64,
}

/// Mean Flesch-Kincaid grade for one authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityReadability {
    pub authority: String,
    pub readability: f64,
}

/// Aggregations over a borrowed table
pub struct StatsEngine<'a> {
    table: &'a CanonicalTable,
}

impl<'a> StatsEngine<'a> {
    pub fn new(table: &'a CanonicalTable) -> Self {
        Self { table }
    }

    /// Word count per title, largest first; untitled records share one bucket
    pub fn wordcount_by_title(&self) -> Vec<TitleWordCount> {
        let mut groups: BTreeMap<Option<u32>, u64> = BTreeMap::new();
        for record in self.table.records() {
            *groups.entry(record.title).or_default() += record.word_count;
        }

        let mut result: Vec<TitleWordCount> = groups
            .into_iter()
            .map(|(title, word_count)| TitleWordCount { title, word_count })
            .collect();
        result.sort_by(|a, b| b.word_count.cmp(&a.word_count));
        result
    }

    /// Word count per authority, largest first; records without an
    /// authority are left out
    pub fn wordcount_by_authority(&self) -> CoreResult<Vec<AuthorityWordCount>> {
        self.table.schema().require_authority()?;

        let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
        for record in self.table.records() {
            if let Some(authority) = record.authority.as_deref() {
                *groups.entry(authority).or_default() += record.word_count;
            }
        }

        let mut result: Vec<AuthorityWordCount> = groups
            .into_iter()
            .map(|(authority, word_count)| AuthorityWordCount {
                authority: authority.to_string(),
                word_count,
            })
            .collect();
        result.sort_by(|a, b| b.word_count.cmp(&a.word_count));
        Ok(result)
    }

    /// Distinct titles in ascending order
    pub fn list_titles(&self) -> Vec<u32> {
        self.table
            .records()
            .iter()
            .filter_map(|r| r.title)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every record with both text and authority, paired with its grade
    ///
    /// Lazy: texts are scored as the iterator is consumed. A `None` score
    /// marks text that could not be scored.
    pub fn scored_records(&self) -> impl Iterator<Item = (&'a Record, Option<f64>)> + 'a {
        self.table
            .records()
            .iter()
            .filter(|r| r.authority.is_some())
            .filter_map(|r| r.text.as_deref().map(|text| (r, flesch_kincaid_grade(text))))
    }

    /// Mean grade per authority, simplest language first
    ///
    /// Unscorable texts are skipped. Returns an empty list when nothing
    /// could be scored.
    pub fn readability_by_authority(&self) -> CoreResult<Vec<AuthorityReadability>> {
        let schema = self.table.schema();
        schema.require_text()?;
        schema.require_authority()?;

        let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        let mut skipped = 0usize;
        for (record, score) in self.scored_records() {
            let (Some(authority), Some(score)) = (record.authority.as_deref(), score) else {
                skipped += 1;
                continue;
            };
            let entry = groups.entry(authority).or_insert((0.0, 0));
            entry.0 += score;
            entry.1 += 1;
        }
        if skipped > 0 {
            debug!("readability: skipped {} unscorable texts", skipped);
        }

        let mut result: Vec<AuthorityReadability> = groups
            .into_iter()
            .map(|(authority, (sum, count))| AuthorityReadability {
                authority: authority.to_string(),
                readability: sum / count as f64,
            })
            .collect();
        result.sort_by(|a, b| a.readability.total_cmp(&b.readability));
        Ok(result)
    }
}
