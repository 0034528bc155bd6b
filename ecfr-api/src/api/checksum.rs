//! Per-authority checksum endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use ecfr_common::{AuthorityChecksum, ChecksumEngine};

use crate::{ApiError, ApiResult, AppState};

/// GET /checksum/:authority
///
/// SHA-256 of all text under one authority. An authority with no chunks
/// yields the hash of the empty string.
pub async fn checksum_by_authority(
    State(state): State<AppState>,
    Path(authority): Path<String>,
) -> ApiResult<Json<AuthorityChecksum>> {
    let table = Arc::clone(&state.table);
    let result = tokio::task::spawn_blocking(move || ChecksumEngine::new(&table).checksum(&authority))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(result))
}
