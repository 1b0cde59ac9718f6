use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Predicted wind-speed interval for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastIntervalDto {
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Lower bound of the confidence interval
    pub lower: f64,
    /// Upper bound of the confidence interval
    pub upper: f64,
    /// Unit of both bounds (e.g. km/h)
    pub units: String,
}

impl ForecastIntervalDto {
    pub fn new(date: NaiveDate, lower: f64, upper: f64, units: impl Into<String>) -> Self {
        Self {
            date,
            lower,
            upper,
            units: units.into(),
        }
    }
}

/// Inclusive date range the forecast is precomputed for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HorizonDto {
    /// First date with a forecast
    pub start: NaiveDate,
    /// Last date with a forecast
    pub end: NaiveDate,
}

/// Daily forecast intervals over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastSeriesDto {
    /// Full forecast horizon
    pub horizon: HorizonDto,
    /// Confidence level of the intervals (e.g. 0.95)
    pub confidence_level: f64,
    /// Rule used to collapse native steps into one value per date
    pub reduction: String,
    /// Intervals ordered by date
    pub points: Vec<ForecastIntervalDto>,
}

impl ForecastSeriesDto {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Description of the loaded model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ModelInfoDto {
    /// Model name from the artifact
    pub name: String,
    /// Model specification, e.g. SARIMAX(1,0,1)x(1,1,1,24)
    pub specification: String,
    /// Native step of the model (hourly or daily)
    pub frequency: String,
    /// Unit of the forecast variable
    pub units: String,
}
