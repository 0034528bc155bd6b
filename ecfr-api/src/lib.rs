//! ecfr-api library - HTTP front end for the eCFR explorer
//!
//! Read-only JSON endpoints over a corpus loaded once at startup.

use std::sync::Arc;

use axum::Router;
use ecfr_common::CanonicalTable;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Canonical table, fully normalized before the state is built
    pub table: Arc<CanonicalTable>,
}

impl AppState {
    /// Create new application state
    pub fn new(table: CanonicalTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::root))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/search", get(api::search_chunks))
        .route("/titles", get(api::list_titles))
        .route("/stats/wordcount", get(api::wordcount_by_title))
        .route("/stats/by-authority", get(api::wordcount_by_authority))
        .route("/stats/custom-readability", get(api::readability_by_authority))
        .route("/checksum/:authority", get(api::checksum_by_authority))
        .route("/history/:title", get(api::simulate_history))
        .merge(api::health_routes())
        // Dashboard is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
