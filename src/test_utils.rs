#[cfg(test)]
pub mod test_utils {
    use crate::config::{HorizonSettings, Settings};
    use crate::helpers::converters::artifact_to_model_info;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use compute::{DailyReduction, ForecastHorizon, build_forecast_table};
    use model::{ArtifactFormat, ModelArtifact};
    use moka::future::Cache;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Hourly AR(1) artifact whose forecast origin is 2024-01-01 00:00.
    pub const TEST_MODEL_JSON: &str = r#"{
        "name": "test-wind",
        "description": "AR(1) fixture for tests",
        "units": "km/h",
        "model": {
            "order": { "p": 1, "d": 0, "q": 0 },
            "ar": [0.5],
            "intercept": 7.0,
            "sigma2": 2.0,
            "frequency": "hourly",
            "last_observed": "2023-12-31T23:00:00",
            "history": [12.0, 13.5, 15.0, 14.2, 13.1, 16.0]
        }
    }"#;

    /// Settings pointing at `TEST_MODEL_JSON` written into `dir`, horizon January 2024.
    pub fn test_settings(dir: &Path) -> Settings {
        let model_path = dir.join("model.json");
        std::fs::write(&model_path, TEST_MODEL_JSON).expect("Failed to write test model");

        Settings {
            model_path,
            bind_address: "127.0.0.1:0".to_string(),
            horizon: HorizonSettings {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            },
            alpha: 0.05,
            daily_reduction: DailyReduction::First,
            cache_ttl_secs: 60,
            cache_capacity: 100,
            request_timeout_secs: 30,
        }
    }

    /// Create AppState for testing over the default 2024-01-01..=2026-12-31 horizon
    pub fn setup_test_app_state() -> AppState {
        let artifact =
            ModelArtifact::parse(TEST_MODEL_JSON, ArtifactFormat::Json).expect("Failed to parse test model");

        let horizon = ForecastHorizon::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
        .unwrap();
        let table = build_forecast_table(&artifact.model, horizon, 0.05, DailyReduction::First)
            .expect("Failed to build test forecast table");

        AppState {
            table: Arc::new(table),
            model_info: artifact_to_model_info(&artifact),
            cache: Cache::new(100),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        let _guard = init_test_tracing();
        create_router(setup_test_app_state())
    }
}
