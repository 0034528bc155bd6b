//! Health check and root banner

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Number of records in the loaded corpus
    pub records: usize,
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "eCFR API is running." }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "ecfr-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.table.len(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
