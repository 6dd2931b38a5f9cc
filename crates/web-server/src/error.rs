use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use serde_json::json;
use thiserror::Error;
use valuation::ValuationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] CoreError),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Each named failure condition keeps its own status: an unknown zone is the
/// caller's mistake (404), a data-coverage gap is not (422), and a store
/// outage is retryable infrastructure trouble (503).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidRequest(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            AppError::Valuation(ValuationError::ZoneNotFound(zone)) => {
                (StatusCode::NOT_FOUND, format!("Zone not found: {zone}"))
            }
            AppError::Valuation(err @ ValuationError::ZoneDataNotFound { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            AppError::Valuation(ValuationError::StoreUnavailable(err)) => {
                tracing::error!(error = %err, "Statistics store unavailable.");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The statistics store is temporarily unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
