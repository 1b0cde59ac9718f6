use chrono::{NaiveDate, NaiveDateTime};
use model::Frequency;

use crate::error::{ComputeError, Result};

/// Inclusive calendar range the forecast table is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastHorizon {
    start: NaiveDate,
    end: NaiveDate,
}

impl ForecastHorizon {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ComputeError::InvalidHorizon { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// First timestamp of the horizon (start date at midnight).
    pub fn start_timestamp(&self) -> NaiveDateTime {
        self.start.and_time(chrono::NaiveTime::MIN)
    }

    /// Last timestamp of the horizon (end date at midnight).
    pub fn end_timestamp(&self) -> NaiveDateTime {
        self.end.and_time(chrono::NaiveTime::MIN)
    }

    /// `end - start` expressed in the model's native unit.
    pub fn step_count(&self, frequency: Frequency) -> usize {
        ((self.end - self.start).num_days() * frequency.steps_per_day()) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar dates in the horizon.
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }
}

impl std::fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
