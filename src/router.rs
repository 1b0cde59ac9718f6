use crate::handlers::{
    dashboard::dashboard,
    forecast::{export_forecast_csv, get_forecast_for_date, get_forecast_series},
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        // Dashboard page
        .route("/", get(dashboard))
        // Health check
        .route("/health", get(health_check))
        // Forecast API
        .route("/api/v1/forecast", get(get_forecast_series))
        .route("/api/v1/forecast/export.csv", get(export_forecast_csv))
        .route("/api/v1/forecast/:date", get(get_forecast_for_date))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
