//! # eCFR Common Library
//!
//! Core of the eCFR explorer service:
//! - Input table loading (CSV, JSON Lines) and schema normalization
//! - Canonical table model
//! - Keyword search, grouped statistics, readability scoring
//! - Per-authority content checksums
//! - Simulated title history
//! - Configuration loading
//!
//! The canonical table is built once and only ever read. Each engine borrows
//! it for the duration of one call.

pub mod checksum;
pub mod config;
pub mod error;
pub mod history;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod readability;
pub mod search;
pub mod stats;

pub use checksum::{AuthorityChecksum, ChecksumEngine};
pub use error::{CoreError, CoreResult, Error, Result};
pub use loader::load_table;
pub use model::{CanonicalTable, ColumnOrigin, RawTable, Record, Schema};
pub use normalize::normalize;
pub use search::{SearchEngine, SearchHit};
pub use stats::{AuthorityReadability, AuthorityWordCount, StatsEngine, TitleWordCount};
