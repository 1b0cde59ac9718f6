use std::path::PathBuf;
use thiserror::Error;

/// Error types for loading and evaluating a forecasting model
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model file could not be read
    #[error("Failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The model file extension does not map to a known format
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    /// JSON artifact could not be deserialized
    #[error("JSON model error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML artifact could not be deserialized
    #[error("YAML model error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The artifact deserialized but its parameters are inconsistent
    #[error("Invalid model: {0}")]
    Invalid(String),

    /// Forecast request cannot be satisfied
    #[error("Forecast error: {0}")]
    Forecast(String),
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
