//! End-to-end tests: load a corpus file from disk and query it
//!
//! Tests cover:
//! - Loading CSV and JSON Lines inputs through the normalizer
//! - Search subset properties
//! - Word count, title and checksum results for a small known corpus
//! - Null-authority handling across aggregations

use std::io::Write;
use std::path::PathBuf;

use ecfr_common::{
    load_table, AuthorityChecksum, CanonicalTable, ChecksumEngine, ColumnOrigin, SearchEngine,
    StatsEngine, TitleWordCount,
};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

/// Test helper: write `contents` to a file named `name` inside a temp dir
fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// Two chunks from title 7 sharing one authority
fn agx_corpus(dir: &TempDir) -> CanonicalTable {
    let path = write_file(
        dir,
        "chunks.csv",
        "source_file,text,authority\n\
         title-7-a.txt,The cat sat.,AGX\n\
         title-7-b.txt,Dogs run fast today.,AGX\n",
    );
    load_table(&path).unwrap()
}

fn mixed_corpus(dir: &TempDir) -> CanonicalTable {
    let path = write_file(
        dir,
        "mixed.csv",
        "source_file,part_title,part_text,authority\n\
         title-1-x.txt,Part 1,Food labeling requirements apply.,FDA\n\
         title-1-y.txt,Part 2,The Secretary may waive labeling.,\n\
         title-2-x.txt,Part 3,Labeling of drugs.,FDA\n\
         appendix.txt,Appendix,,EPA\n\
         title-2-y.txt,Part 4,Air quality standards.,EPA\n",
    );
    load_table(&path).unwrap()
}

// =============================================================================
// Known corpus scenario
// =============================================================================

#[test]
fn test_agx_titles_wordcount_checksum() {
    let dir = TempDir::new().unwrap();
    let table = agx_corpus(&dir);

    let stats = StatsEngine::new(&table);
    assert_eq!(stats.list_titles(), vec![7]);
    assert_eq!(
        stats.wordcount_by_title(),
        vec![TitleWordCount { title: Some(7), word_count: 7 }]
    );

    let expected = format!("{:x}", Sha256::digest(b"The cat sat. Dogs run fast today."));
    assert_eq!(
        ChecksumEngine::new(&table).checksum("AGX").unwrap(),
        AuthorityChecksum { authority: "AGX".to_string(), checksum: expected }
    );
}

#[test]
fn test_load_reports_derivations() {
    let dir = TempDir::new().unwrap();
    let table = mixed_corpus(&dir);
    let schema = table.schema();

    assert!(schema.text_from_alias);
    assert_eq!(schema.title_origin, ColumnOrigin::Derived);
    assert_eq!(schema.word_count_origin, ColumnOrigin::Derived);

    for record in table.records() {
        let expected = record
            .text
            .as_deref()
            .map_or(0, |t| t.split_whitespace().count() as u64);
        assert_eq!(record.word_count, expected);
    }
}

// =============================================================================
// Search properties
// =============================================================================

#[test]
fn test_empty_search_returns_every_record_with_text() {
    let dir = TempDir::new().unwrap();
    let table = mixed_corpus(&dir);

    let hits = SearchEngine::new(&table).search("", None).unwrap();
    let with_text = table.records().iter().filter(|r| r.text.is_some()).count();
    assert_eq!(hits.len(), with_text);
    assert_eq!(hits.len(), 4);
}

#[test]
fn test_title_filtered_search_is_subset() {
    let dir = TempDir::new().unwrap();
    let table = mixed_corpus(&dir);
    let engine = SearchEngine::new(&table);

    let all = engine.search("labeling", None).unwrap();
    assert_eq!(all.len(), 3);

    for title in [1, 2, 99] {
        let filtered = engine.search("labeling", Some(title)).unwrap();
        let expected: Vec<_> = all
            .iter()
            .filter(|h| h.title.map(i64::from) == Some(title))
            .cloned()
            .collect();
        assert_eq!(filtered, expected);
    }
}

#[test]
fn test_search_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let table = mixed_corpus(&dir);
    let engine = SearchEngine::new(&table);

    let first = serde_json::to_string(&engine.search("a", None).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.search("a", None).unwrap()).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Null authority handling
// =============================================================================

#[test]
fn test_null_authority_only_counts_toward_title() {
    let dir = TempDir::new().unwrap();
    let table = mixed_corpus(&dir);
    let stats = StatsEngine::new(&table);

    // "The Secretary may waive labeling." has no authority
    let by_authority = stats.wordcount_by_authority().unwrap();
    let authority_total: u64 = by_authority.iter().map(|g| g.word_count).sum();
    assert_eq!(authority_total, table.total_word_count() - 5);

    let by_title = stats.wordcount_by_title();
    let title_total: u64 = by_title.iter().map(|g| g.word_count).sum();
    assert_eq!(title_total, table.total_word_count());

    let readability = stats.readability_by_authority().unwrap();
    let authorities: Vec<_> = readability.iter().map(|r| r.authority.as_str()).collect();
    assert_eq!(authorities.len(), 2);
    assert!(authorities.contains(&"FDA"));
    assert!(authorities.contains(&"EPA"));
}

#[test]
fn test_untitled_rows_form_null_bucket() {
    let dir = TempDir::new().unwrap();
    let table = mixed_corpus(&dir);

    let by_title = StatsEngine::new(&table).wordcount_by_title();
    let null_bucket = by_title.iter().find(|g| g.title.is_none()).unwrap();
    // appendix.txt row has no text
    assert_eq!(null_bucket.word_count, 0);
    assert_eq!(StatsEngine::new(&table).list_titles(), vec![1, 2]);
}

// =============================================================================
// JSON Lines input
// =============================================================================

#[test]
fn test_jsonl_corpus() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "chunks.jsonl",
        "{\"title\": 40, \"text\": \"Air permits.\", \"authority\": \"EPA\", \"word_count\": 2}\n\
         {\"title\": null, \"text\": \"Water.\", \"authority\": \"EPA\", \"word_count\": null}\n",
    );
    let table = load_table(&path).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.schema().title_origin, ColumnOrigin::Read);
    assert_eq!(table.records()[0].title, Some(40));
    assert_eq!(table.records()[1].title, None);
    assert_eq!(table.records()[1].word_count, 1);
}

#[test]
fn test_malformed_jsonl_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.jsonl", "{\"text\": \"ok\"}\nnot json\n");
    assert!(load_table(&path).is_err());
}
