use chrono::NaiveDate;
use common::{ForecastIntervalDto, ForecastSeriesDto, HorizonDto, ModelInfoDto};
use compute::{DailyInterval, ForecastHorizon, ForecastTable};
use model::ModelArtifact;

/// Helper function to convert a daily interval to its transport form
pub fn interval_to_dto(interval: &DailyInterval, units: &str) -> ForecastIntervalDto {
    ForecastIntervalDto::new(interval.date, interval.lower, interval.upper, units)
}

pub fn horizon_to_dto(horizon: ForecastHorizon) -> HorizonDto {
    HorizonDto {
        start: horizon.start(),
        end: horizon.end(),
    }
}

/// Helper function to convert a slice of the forecast table to a daily series
pub fn table_to_series(
    table: &ForecastTable,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    units: &str,
) -> ForecastSeriesDto {
    let points = table
        .daily_intervals(start_date, end_date)
        .iter()
        .map(|interval| interval_to_dto(interval, units))
        .collect();

    ForecastSeriesDto {
        horizon: horizon_to_dto(table.horizon()),
        confidence_level: table.confidence_level(),
        reduction: table.reduction().to_string(),
        points,
    }
}

pub fn artifact_to_model_info(artifact: &ModelArtifact) -> ModelInfoDto {
    ModelInfoDto {
        name: artifact.name.clone(),
        specification: artifact.model.to_string(),
        frequency: artifact.model.frequency.to_string(),
        units: artifact.units.clone(),
    }
}
