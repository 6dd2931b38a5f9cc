use crate::{AppState, error::AppError};
use axum::{Json, extract::State};
use core_types::{ValuationRequest, ValuationResult};
use serde_json::json;
use std::sync::Arc;

/// # GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// # POST /valuation/estimate
///
/// Validates the request attributes at this boundary, then hands the request
/// to the engine. The engine never re-checks attribute ranges.
pub async fn estimate_valuation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValuationRequest>,
) -> Result<Json<ValuationResult>, AppError> {
    payload.validate()?;
    let result = state.engine.estimate(&payload).await?;
    Ok(Json(result))
}
