//! Forecasters and helpers shared by the compute tests.

use chrono::{NaiveDate, NaiveDateTime};
use model::{Frequency, IntervalForecast, IntervalForecaster, Order, SarimaxModel, SeasonalOrder};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
}

/// Deterministic forecaster whose bounds drift upwards and widen with every step.
pub struct LinearForecaster {
    pub origin: NaiveDateTime,
    pub frequency: Frequency,
}

impl LinearForecaster {
    pub fn hourly(origin: NaiveDateTime) -> Self {
        Self {
            origin,
            frequency: Frequency::Hourly,
        }
    }

    pub fn daily(origin: NaiveDateTime) -> Self {
        Self {
            origin,
            frequency: Frequency::Daily,
        }
    }
}

impl IntervalForecaster for LinearForecaster {
    fn frequency(&self) -> Frequency {
        self.frequency
    }

    fn forecast_origin(&self) -> NaiveDateTime {
        self.origin
    }

    fn conf_int(&self, steps: usize, _alpha: f64) -> model::Result<IntervalForecast> {
        let mut forecast = IntervalForecast::default();
        for h in 0..steps {
            let mean = 12.0 + h as f64 * 0.001;
            let half_width = 1.0 + h as f64 * 0.0005;
            forecast.timestamps.push(self.frequency.advance(self.origin, h));
            forecast.mean.push(mean);
            forecast.lower.push(mean - half_width);
            forecast.upper.push(mean + half_width);
        }
        Ok(forecast)
    }
}

/// Forecaster that swaps its bounds.
pub struct BrokenForecaster(pub NaiveDateTime);

impl IntervalForecaster for BrokenForecaster {
    fn frequency(&self) -> Frequency {
        Frequency::Daily
    }

    fn forecast_origin(&self) -> NaiveDateTime {
        self.0
    }

    fn conf_int(&self, steps: usize, _alpha: f64) -> model::Result<IntervalForecast> {
        Ok(IntervalForecast {
            timestamps: (0..steps).map(|h| Frequency::Daily.advance(self.0, h)).collect(),
            mean: vec![10.0; steps],
            lower: vec![11.0; steps],
            upper: vec![9.0; steps],
        })
    }
}

/// Small hourly SARIMA(1,0,1)x(1,1,0,24) model ending on 2023-12-31 23:00.
pub fn hourly_wind_model() -> SarimaxModel {
    let history: Vec<f64> = (0..48)
        .map(|h| 14.0 + 4.0 * ((h % 24) as f64 / 24.0 * std::f64::consts::TAU).sin())
        .collect();

    SarimaxModel {
        order: Order { p: 1, d: 0, q: 1 },
        seasonal_order: SeasonalOrder {
            p: 1,
            d: 1,
            q: 0,
            period: 24,
        },
        ar: vec![0.6],
        ma: vec![-0.2],
        seasonal_ar: vec![-0.3],
        seasonal_ma: vec![],
        intercept: 0.0,
        sigma2: 1.2,
        frequency: Frequency::Hourly,
        last_observed: date(2023, 12, 31).and_hms_opt(23, 0, 0).unwrap(),
        history,
        residuals: vec![0.1, -0.3, 0.2],
    }
}
