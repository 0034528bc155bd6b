//! Simulated history endpoint
//!
//! The corpus is a single snapshot; these numbers are synthetic. Any integer
//! title is served, negatives included.

use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use ecfr_common::history::{simulated_history, TitleHistory};

use crate::{ApiError, ApiResult};

/// GET /history/:title
pub async fn simulate_history(
    title: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<TitleHistory>> {
    let Path(title) = title.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(simulated_history(title)))
}
