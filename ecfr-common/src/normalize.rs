//! Schema normalization
//!
//! The input corpus has drifted over time: the body column may be called
//! `part_text`, `title` may be missing or empty, and `word_count` may not have
//! been precomputed. [`normalize`] reconciles all of that in one pass so the
//! engines can rely on the [`Schema`] it records.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::model::{CanonicalTable, ColumnOrigin, RawTable, Record, Schema};

static TITLE_IN_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"title-(\d+)").expect("static regex is valid"));

/// Column indices resolved against the raw header
struct Columns {
    text: Option<usize>,
    text_from_alias: bool,
    authority: Option<usize>,
    part_title: Option<usize>,
    source_file: Option<usize>,
    title: Option<usize>,
    word_count: Option<usize>,
}

impl Columns {
    fn resolve(raw: &RawTable) -> Self {
        let (text, text_from_alias) = match raw.column_index("text") {
            Some(idx) => (Some(idx), false),
            None => match raw.column_index("part_text") {
                Some(idx) => (Some(idx), true),
                None => (None, false),
            },
        };

        Self {
            text,
            text_from_alias,
            authority: raw.column_index("authority"),
            part_title: raw.column_index("part_title"),
            source_file: raw.column_index("source_file"),
            title: raw.column_index("title"),
            word_count: raw.column_index("word_count"),
        }
    }
}

/// Build the canonical table from a raw input table
///
/// Never fails: malformed cells degrade to absent values (or, for
/// `word_count`, to a value derived from the row's text) and are logged.
pub fn normalize(raw: RawTable) -> CanonicalTable {
    let cols = Columns::resolve(&raw);
    let rows = raw.into_rows();

    // Title: read when the column carries at least one usable value,
    // otherwise derive every row from its source filename.
    let mut malformed_titles = 0usize;
    let read_titles: Option<Vec<Option<u32>>> = cols.title.map(|idx| {
        rows.iter()
            .map(|row| {
                let cell = row[idx].as_deref()?;
                let parsed = parse_title(cell);
                if parsed.is_none() {
                    malformed_titles += 1;
                }
                parsed
            })
            .collect()
    });

    let (titles, title_origin) = match read_titles {
        Some(titles) if titles.iter().any(Option::is_some) => (titles, ColumnOrigin::Read),
        _ => {
            if cols.source_file.is_none() {
                warn!("No 'title' values and no 'source_file' column; all titles will be null");
            }
            let derived = rows
                .iter()
                .map(|row| {
                    cols.source_file
                        .and_then(|idx| row[idx].as_deref())
                        .and_then(title_from_source_file)
                })
                .collect();
            (derived, ColumnOrigin::Derived)
        }
    };

    if title_origin == ColumnOrigin::Read && malformed_titles > 0 {
        warn!("{} malformed title values treated as null", malformed_titles);
    }

    let word_count_origin = if cols.word_count.is_some() {
        ColumnOrigin::Read
    } else {
        ColumnOrigin::Derived
    };
    let mut rederived_counts = 0usize;

    let cell = |row: &Vec<Option<String>>, idx: Option<usize>| -> Option<String> {
        idx.and_then(|i| row[i].clone())
    };

    let records: Vec<Record> = rows
        .iter()
        .zip(titles)
        .map(|(row, title)| {
            let text = cell(row, cols.text);

            let word_count = match cols.word_count {
                Some(idx) => match row[idx].as_deref().and_then(parse_count) {
                    Some(count) => count,
                    None => {
                        rederived_counts += 1;
                        count_words(text.as_deref())
                    }
                },
                None => count_words(text.as_deref()),
            };

            Record {
                title,
                part_title: cell(row, cols.part_title),
                authority: cell(row, cols.authority),
                text,
                word_count,
                source_file: cell(row, cols.source_file),
            }
        })
        .collect();

    if rederived_counts > 0 {
        warn!(
            "{} rows had missing or malformed word_count; derived from text",
            rederived_counts
        );
    }

    let schema = Schema {
        has_text: cols.text.is_some(),
        text_from_alias: cols.text_from_alias,
        has_authority: cols.authority.is_some(),
        has_part_title: cols.part_title.is_some(),
        has_source_file: cols.source_file.is_some(),
        title_origin,
        word_count_origin,
    };

    if schema.text_from_alias {
        info!("Using 'part_text' column as 'text'");
    }
    if !schema.has_text {
        warn!("Input has no 'text' or 'part_text' column; search and checksum will be unavailable");
    }
    if !schema.has_authority {
        warn!("Input has no 'authority' column; authority statistics will be unavailable");
    }

    let titled = records.iter().filter(|r| r.title.is_some()).count();
    info!(
        "Normalized {} records ({} titled, title {:?}, word_count {:?})",
        records.len(),
        titled,
        schema.title_origin,
        schema.word_count_origin
    );

    CanonicalTable::new(records, schema)
}

/// Whitespace-token count; absent text counts as empty
pub fn count_words(text: Option<&str>) -> u64 {
    text.map_or(0, |t| t.split_whitespace().count() as u64)
}

/// Extract the integer following `title-` in a filename
pub fn title_from_source_file(source_file: &str) -> Option<u32> {
    TITLE_IN_FILENAME
        .captures(source_file)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a title cell: a non-negative integer, or an integer-valued float
/// such as `7.0` as written by dataframe exports with nulls
fn parse_title(cell: &str) -> Option<u32> {
    parse_whole_number(cell).and_then(|n| u32::try_from(n).ok())
}

fn parse_count(cell: &str) -> Option<u64> {
    parse_whole_number(cell)
}

fn parse_whole_number(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<u64>() {
        return Some(n);
    }
    let f: f64 = cell.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}
