//! HTTP API handlers for ecfr-api

pub mod buildinfo;
pub mod checksum;
pub mod health;
pub mod history;
pub mod search;
pub mod stats;

pub use buildinfo::get_build_info;
pub use checksum::checksum_by_authority;
pub use health::{health_routes, root};
pub use history::simulate_history;
pub use search::search_chunks;
pub use stats::{list_titles, readability_by_authority, wordcount_by_authority, wordcount_by_title};
