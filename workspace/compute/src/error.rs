use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error raised by the forecasting model
    #[error("Model error: {0}")]
    Model(#[from] model::ModelError),

    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Horizon with its start after its end
    #[error("Invalid horizon: start {start} is after end {end}")]
    InvalidHorizon { start: NaiveDate, end: NaiveDate },

    /// Horizon starting before the model can forecast
    #[error("Horizon start {start} is before the model forecast origin {origin}")]
    HorizonBeforeOrigin { start: NaiveDateTime, origin: NaiveDateTime },

    /// Model produced an unusable interval
    #[error("Invalid interval at {timestamp}: lower {lower}, upper {upper}")]
    InvalidInterval {
        timestamp: NaiveDateTime,
        lower: f64,
        upper: f64,
    },

    /// Model returned fewer steps than requested
    #[error("Forecast error: {0}")]
    ForecastComputation(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        let err = ComputeError::DataFrame(error.to_string());
        error!(?err, "DataFrame error");
        err
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
