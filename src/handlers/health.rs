use axum::{extract::State, http::StatusCode, response::Json};
use tracing::instrument;

use crate::helpers::converters::horizon_to_dto;
use crate::schemas::{AppState, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    // An empty table means nothing can be served
    if state.table.is_empty() {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model_info.clone(),
        horizon: horizon_to_dto(state.table.horizon()),
        table_rows: state.table.len(),
    };

    Ok(Json(response))
}
