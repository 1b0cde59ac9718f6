use chrono::NaiveDateTime;

use crate::error::Result;
use crate::frequency::Frequency;

/// Point forecast and confidence interval over consecutive future steps.
///
/// All vectors have the same length; element `i` belongs to `timestamps[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalForecast {
    pub timestamps: Vec<NaiveDateTime>,
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl IntervalForecast {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Iterate over `(timestamp, lower, upper)` triples.
    pub fn bounds(&self) -> impl Iterator<Item = (NaiveDateTime, f64, f64)> + '_ {
        self.timestamps
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .map(|(ts, (lo, hi))| (*ts, *lo, *hi))
    }
}

/// A trained model able to produce confidence intervals for future steps.
///
/// Implementations are read-only: producing a forecast never changes the model.
pub trait IntervalForecaster: Send + Sync {
    /// Native spacing of the forecast steps.
    fn frequency(&self) -> Frequency;

    /// Timestamp of the first future step.
    fn forecast_origin(&self) -> NaiveDateTime;

    /// Forecast `steps` future steps with a `1 - alpha` confidence interval.
    fn conf_int(&self, steps: usize, alpha: f64) -> Result<IntervalForecast>;
}
