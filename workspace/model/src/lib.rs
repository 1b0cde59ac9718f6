//! Trained forecasting model: the serialized artifact and the
//! interval-forecast capability it provides.

pub mod artifact;
pub mod error;
pub mod forecaster;
pub mod frequency;
pub mod sarimax;

pub use artifact::{ArtifactFormat, ModelArtifact};
pub use error::{ModelError, Result};
pub use forecaster::{IntervalForecast, IntervalForecaster};
pub use frequency::Frequency;
pub use sarimax::{ExpandedArma, Order, SarimaxModel, SeasonalOrder};
