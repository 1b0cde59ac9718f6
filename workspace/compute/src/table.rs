//! Forecast table construction and date lookup.
//!
//! The table is materialised once from the model's interval forecast and is
//! immutable afterwards. Rows keep the model's native granularity; lookups
//! work on calendar dates.

use chrono::{NaiveDate, NaiveDateTime};
use model::{Frequency, IntervalForecaster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};
use crate::horizon::ForecastHorizon;

/// How the native rows of one calendar date collapse into a single interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailyReduction {
    /// The first row of the date (midnight for aligned models).
    #[default]
    First,
    /// Lowest lower bound and highest upper bound of the date.
    Envelope,
}

impl std::fmt::Display for DailyReduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DailyReduction::First => write!(f, "first"),
            DailyReduction::Envelope => write!(f, "envelope"),
        }
    }
}

/// One native step of the forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub timestamp: NaiveDateTime,
    pub lower: f64,
    pub upper: f64,
}

/// Interval for a calendar date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyInterval {
    pub date: NaiveDate,
    pub lower: f64,
    pub upper: f64,
}

/// Materialised forecast over a horizon, keyed by timestamp and indexed by date.
#[derive(Debug, Clone)]
pub struct ForecastTable {
    horizon: ForecastHorizon,
    frequency: Frequency,
    alpha: f64,
    reduction: DailyReduction,
    rows: Vec<ForecastRow>,
    by_date: BTreeMap<NaiveDate, Range<usize>>,
}

/// Builds the forecast table for `horizon` from the model's confidence interval.
///
/// The model is asked for enough steps to reach the first native step on the
/// horizon end date, starting from its forecast origin. Only rows whose
/// calendar date lies inside the horizon are kept.
#[instrument(skip(model), fields(frequency = %model.frequency()))]
pub fn build_forecast_table(
    model: &dyn IntervalForecaster,
    horizon: ForecastHorizon,
    alpha: f64,
    reduction: DailyReduction,
) -> Result<ForecastTable> {
    let frequency = model.frequency();
    let origin = model.forecast_origin();
    let start = horizon.start_timestamp();

    // An origin later on the start date still leaves that date servable.
    if origin.date() > horizon.start() {
        return Err(ComputeError::HorizonBeforeOrigin { start, origin });
    }

    let lead = frequency.steps_until(origin, start);
    let steps = lead + horizon.step_count(frequency) + 1;
    debug!(%origin, lead, steps, "Requesting forecast interval");

    let forecast = model.conf_int(steps, alpha)?;
    if forecast.len() < steps {
        return Err(ComputeError::ForecastComputation(format!(
            "model returned {} steps, {} requested",
            forecast.len(),
            steps
        )));
    }

    let rows = forecast
        .bounds()
        .filter(|(timestamp, _, _)| horizon.contains(timestamp.date()))
        .map(|(timestamp, lower, upper)| ForecastRow { timestamp, lower, upper })
        .collect();

    let table = ForecastTable::from_rows(horizon, frequency, alpha, reduction, rows)?;
    info!(
        %horizon,
        rows = table.len(),
        days = table.num_days(),
        "Forecast table built"
    );
    Ok(table)
}

impl ForecastTable {
    /// Assemble a table from rows restricted to the horizon.
    ///
    /// Rows must be strictly increasing in time, carry finite bounds with
    /// `lower <= upper`, and cover every date of the horizon.
    pub fn from_rows(
        horizon: ForecastHorizon,
        frequency: Frequency,
        alpha: f64,
        reduction: DailyReduction,
        rows: Vec<ForecastRow>,
    ) -> Result<Self> {
        let mut by_date: BTreeMap<NaiveDate, Range<usize>> = BTreeMap::new();

        for (idx, row) in rows.iter().enumerate() {
            if let Some(prev) = idx.checked_sub(1).map(|i| rows[i].timestamp) {
                if prev >= row.timestamp {
                    return Err(ComputeError::ForecastComputation(format!(
                        "timestamps not increasing at {}",
                        row.timestamp
                    )));
                }
            }
            if !horizon.contains(row.timestamp.date()) {
                return Err(ComputeError::ForecastComputation(format!(
                    "row at {} is outside the horizon {}",
                    row.timestamp, horizon
                )));
            }
            if !row.lower.is_finite() || !row.upper.is_finite() || row.lower > row.upper {
                return Err(ComputeError::InvalidInterval {
                    timestamp: row.timestamp,
                    lower: row.lower,
                    upper: row.upper,
                });
            }
            by_date
                .entry(row.timestamp.date())
                .and_modify(|range| range.end = idx + 1)
                .or_insert(idx..idx + 1);
        }

        if by_date.len() != horizon.num_days() {
            let missing = horizon
                .start()
                .iter_days()
                .take_while(|day| *day <= horizon.end())
                .find(|day| !by_date.contains_key(day))
                .unwrap_or(horizon.end());
            return Err(ComputeError::ForecastComputation(format!(
                "no forecast rows for {}",
                missing
            )));
        }

        Ok(Self {
            horizon,
            frequency,
            alpha,
            reduction,
            rows,
            by_date,
        })
    }

    pub fn horizon(&self) -> ForecastHorizon {
        self.horizon
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    pub fn reduction(&self) -> DailyReduction {
        self.reduction
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct calendar dates in the table.
    pub fn num_days(&self) -> usize {
        self.by_date.len()
    }

    /// Calendar dates present in the table, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Interval for `date`, or `None` when the date is outside the table.
    pub fn lookup(&self, date: NaiveDate) -> Option<DailyInterval> {
        self.by_date
            .get(&date)
            .map(|range| self.reduce(date, &self.rows[range.clone()]))
    }

    /// Daily intervals between `from` and `to` (inclusive), clipped to the table.
    pub fn daily_intervals(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<DailyInterval> {
        let from = from.unwrap_or(self.horizon.start());
        let to = to.unwrap_or(self.horizon.end());
        if from > to {
            return Vec::new();
        }

        self.by_date
            .range(from..=to)
            .map(|(date, range)| self.reduce(*date, &self.rows[range.clone()]))
            .collect()
    }

    fn reduce(&self, date: NaiveDate, rows: &[ForecastRow]) -> DailyInterval {
        match self.reduction {
            DailyReduction::First => DailyInterval {
                date,
                lower: rows[0].lower,
                upper: rows[0].upper,
            },
            DailyReduction::Envelope => rows.iter().fold(
                DailyInterval {
                    date,
                    lower: f64::INFINITY,
                    upper: f64::NEG_INFINITY,
                },
                |acc, row| DailyInterval {
                    date,
                    lower: acc.lower.min(row.lower),
                    upper: acc.upper.max(row.upper),
                },
            ),
        }
    }
}
