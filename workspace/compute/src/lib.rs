pub mod error;
pub mod export;
pub mod horizon;
pub mod table;

#[cfg(test)]
pub mod testing;

pub use error::{ComputeError, Result};
pub use horizon::ForecastHorizon;
pub use table::{DailyInterval, DailyReduction, ForecastRow, ForecastTable, build_forecast_table};

