//! Keyword search endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use ecfr_common::{SearchEngine, SearchHit};
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState};

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring to look for in chunk text
    pub query: String,

    /// Restrict to one CFR title. Any integer parses; titles no chunk can
    /// carry just match nothing.
    pub title: Option<i64>,
}

/// GET /search?query=FDA&title=21
///
/// Returns every matching chunk in corpus order. Not paginated. Lowercases
/// every chunk, so the scan runs off the async executor.
pub async fn search_chunks(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SearchHit>>> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let table = Arc::clone(&state.table);
    let hits = tokio::task::spawn_blocking(move || {
        SearchEngine::new(&table).search(&params.query, params.title)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(hits))
}
