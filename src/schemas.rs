use chrono::NaiveDate;
use common::{ForecastIntervalDto, ForecastSeriesDto, HorizonDto, ModelInfoDto};
use compute::ForecastTable;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Forecast table built once at startup
    pub table: Arc<ForecastTable>,
    /// Description of the loaded model
    pub model_info: ModelInfoDto,
    /// Cache for series responses
    pub cache: Cache<String, CachedData>,
    /// Per-request timeout
    pub request_timeout: Duration,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Series(ForecastSeriesDto),
}

/// Query parameters for the dashboard page
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Selected date (YYYY-MM-DD); defaults to the first date of the horizon
    pub date: Option<NaiveDate>,
}

/// Query parameters for the forecast series endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeriesQuery {
    /// First date to include (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
#[aliases(
    IntervalApiResponse = ApiResponse<ForecastIntervalDto>,
    SeriesApiResponse = ApiResponse<ForecastSeriesDto>
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Loaded model
    pub model: ModelInfoDto,
    /// Forecast horizon
    pub horizon: HorizonDto,
    /// Number of native rows in the forecast table
    pub table_rows: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecast::get_forecast_for_date,
        crate::handlers::forecast::get_forecast_series,
        crate::handlers::forecast::export_forecast_csv,
    ),
    components(
        schemas(
            IntervalApiResponse,
            SeriesApiResponse,
            ErrorResponse,
            HealthResponse,
            SeriesQuery,
            ForecastIntervalDto,
            ForecastSeriesDto,
            HorizonDto,
            ModelInfoDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecast", description = "Wind-speed forecast endpoints"),
    ),
    info(
        title = "Windcast API",
        description = "Wind-speed forecast intervals from a pre-trained seasonal ARIMA model",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
