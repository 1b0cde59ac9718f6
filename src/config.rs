use anyhow::{Context, Result};
use chrono::NaiveDate;
use compute::{DailyReduction, ForecastHorizon, ForecastTable, build_forecast_table};
use config::{Config, Environment, File};
use model::ModelArtifact;
use moka::future::Cache;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::helpers::converters::artifact_to_model_info;
use crate::schemas::AppState;

/// Horizon section of the settings
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HorizonSettings {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Application settings, layered from defaults, an optional config file and
/// `WINDCAST__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path of the serialized model artifact (.json, .yaml)
    pub model_path: PathBuf,
    /// Address the web server binds to
    pub bind_address: String,
    /// Dates the forecast table covers
    pub horizon: HorizonSettings,
    /// Significance level of the interval (0.05 gives a 95% interval)
    pub alpha: f64,
    /// How native steps collapse into one interval per date
    pub daily_reduction: DailyReduction,
    /// Lifetime of cached API responses
    pub cache_ttl_secs: u64,
    /// Maximum number of cached API responses
    pub cache_capacity: u64,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Load settings. Without an explicit path, `windcast.{yaml,json,toml}` in the
    /// working directory is used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let builder = Config::builder()
            .set_default("model_path", "sarimax_model.json")?
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("horizon.start", "2024-01-01")?
            .set_default("horizon.end", "2026-12-31")?
            .set_default("alpha", 0.05)?
            .set_default("daily_reduction", "first")?
            .set_default("cache_ttl_secs", 300_i64)?
            .set_default("cache_capacity", 1000_i64)?
            .set_default("request_timeout_secs", 30_i64)?;

        let builder = match config_path {
            Some(path) => {
                debug!("Using config file: {}", path.display());
                builder.add_source(File::from(path))
            }
            None => builder.add_source(File::with_name("windcast").required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix("WINDCAST").separator("__"))
            .build()?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(settings)
    }

    /// Validated forecast horizon
    pub fn horizon(&self) -> compute::Result<ForecastHorizon> {
        ForecastHorizon::new(self.horizon.start, self.horizon.end)
    }
}

/// Load the model artifact and build the forecast table for the configured horizon.
pub fn load_forecast(settings: &Settings) -> Result<(ModelArtifact, ForecastTable)> {
    info!("Loading model from {}", settings.model_path.display());
    let artifact = ModelArtifact::load(&settings.model_path)
        .with_context(|| format!("Failed to load model {}", settings.model_path.display()))?;

    let horizon = settings.horizon()?;
    let table = build_forecast_table(&artifact.model, horizon, settings.alpha, settings.daily_reduction)
        .context("Failed to build forecast table")?;

    Ok((artifact, table))
}

/// Initialize application state from settings
pub fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    let (artifact, table) = load_forecast(settings)?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(settings.cache_capacity)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    Ok(AppState {
        table: Arc::new(table),
        model_info: artifact_to_model_info(&artifact),
        cache,
        request_timeout: Duration::from_secs(settings.request_timeout_secs),
    })
}
