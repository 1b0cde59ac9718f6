use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use common::{ForecastIntervalDto, ForecastSeriesDto};
use tracing::{debug, error, instrument};

use crate::helpers::converters::{interval_to_dto, table_to_series};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, SeriesQuery};

/// Get the forecast interval for a single date
#[utoipa::path(
    get,
    path = "/api/v1/forecast/{date}",
    tag = "forecast",
    params(
        ("date" = String, Path, description = "Date to look up (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Forecast interval retrieved successfully", body = crate::schemas::IntervalApiResponse),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Date outside the forecast horizon", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_for_date(
    Path(date): Path<NaiveDate>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastIntervalDto>>, (StatusCode, Json<ErrorResponse>)> {
    let Some(interval) = state.table.lookup(date) else {
        let horizon = state.table.horizon();
        debug!(%date, %horizon, "Date outside forecast horizon");
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                format!(
                    "Date {} is out of range. Please select a date between {} and {}.",
                    date,
                    horizon.start(),
                    horizon.end()
                ),
                "DATE_OUT_OF_RANGE",
            )),
        ));
    };

    let response = ApiResponse {
        data: interval_to_dto(&interval, &state.model_info.units),
        message: "Forecast interval retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get daily forecast intervals over a date range
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    responses(
        (status = 200, description = "Forecast series retrieved successfully", body = crate::schemas::SeriesApiResponse),
        (status = 400, description = "Malformed query")
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast_series(
    Query(query): Query<SeriesQuery>,
    State(state): State<AppState>,
) -> Json<ApiResponse<ForecastSeriesDto>> {
    // Create cache key
    let cache_key = format!("series_{:?}", query);

    // Check cache first
    if let Some(CachedData::Series(series)) = state.cache.get(&cache_key).await {
        return Json(ApiResponse {
            data: series,
            message: "Forecast series retrieved from cache".to_string(),
            success: true,
        });
    }

    let series = table_to_series(&state.table, query.start_date, query.end_date, &state.model_info.units);
    debug!(points = series.len(), "Forecast series computed");

    // Cache the result
    state.cache.insert(cache_key, CachedData::Series(series.clone())).await;

    Json(ApiResponse {
        data: series,
        message: "Forecast series retrieved successfully".to_string(),
        success: true,
    })
}

/// Download the full forecast table at the model's native granularity
#[utoipa::path(
    get,
    path = "/api/v1/forecast/export.csv",
    tag = "forecast",
    responses(
        (status = 200, description = "CSV with timestamp, date, lower and upper columns", body = String, content_type = "text/csv"),
        (status = 500, description = "Export failed")
    )
)]
#[instrument(skip(state))]
pub async fn export_forecast_csv(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let table = state.table.clone();

    let result = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        table.write_csv(&mut buf).map(|_| buf)
    })
    .await;

    match result {
        Ok(Ok(body)) => Ok((
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"forecast.csv\""),
            ],
            body,
        )),
        Ok(Err(e)) => {
            error!("Failed to export forecast table: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            error!("Export task failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
