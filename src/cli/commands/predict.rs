use anyhow::Result;
use chrono::NaiveDate;
use std::io::Write;
use tracing::{debug, info};

use crate::config::{Settings, load_forecast};
use crate::handlers::dashboard::out_of_range_message;

/// Write the interval for `date` to `out`. A date outside the horizon is reported, not an error.
pub fn predict<W: Write>(settings: &Settings, date: NaiveDate, out: &mut W) -> Result<()> {
    let (artifact, table) = load_forecast(settings)?;
    debug!(%date, horizon = %table.horizon(), "Looking up forecast");

    match table.lookup(date) {
        Some(interval) => {
            info!(%date, lower = interval.lower, upper = interval.upper, "Forecast found");
            writeln!(out, "Prediction for {}", interval.date)?;
            writeln!(out, "Lower Speed: {:.2} {}", interval.lower, artifact.units)?;
            writeln!(out, "Upper Speed: {:.2} {}", interval.upper, artifact.units)?;
        }
        None => {
            info!(%date, "Date outside forecast horizon");
            writeln!(out, "{}", out_of_range_message(table.horizon()))?;
        }
    }

    Ok(())
}
