//! Grouped statistics endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use ecfr_common::{AuthorityReadability, AuthorityWordCount, StatsEngine, TitleWordCount};

use crate::{ApiError, ApiResult, AppState};

/// GET /stats/wordcount
///
/// Word count per title, largest first. Untitled chunks appear under a
/// `null` title.
pub async fn wordcount_by_title(State(state): State<AppState>) -> Json<Vec<TitleWordCount>> {
    Json(StatsEngine::new(&state.table).wordcount_by_title())
}

/// GET /stats/by-authority
///
/// Word count per authority, largest first.
pub async fn wordcount_by_authority(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AuthorityWordCount>>> {
    Ok(Json(StatsEngine::new(&state.table).wordcount_by_authority()?))
}

/// GET /titles
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<u32>> {
    Json(StatsEngine::new(&state.table).list_titles())
}

/// GET /stats/custom-readability
///
/// Mean Flesch-Kincaid grade per authority, simplest first. Scores every
/// chunk, so the work runs off the async executor.
pub async fn readability_by_authority(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AuthorityReadability>>> {
    let table = Arc::clone(&state.table);
    let result = tokio::task::spawn_blocking(move || {
        StatsEngine::new(&table).readability_by_authority()
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(result))
}
