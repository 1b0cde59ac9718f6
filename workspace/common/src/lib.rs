//! Transport-layer types returned by the HTTP API.
//! These structs are plain data: no computation happens here, the handlers
//! fill them from the compute crate's forecast table.

mod forecast;

pub use forecast::{ForecastIntervalDto, ForecastSeriesDto, HorizonDto, ModelInfoDto};
