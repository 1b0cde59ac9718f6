//! Seasonal ARIMA model restored from a trained artifact.
//!
//! The model is stored in its factored form, `(p, d, q) x (P, D, Q, s)` plus
//! the coefficient vectors. Forecasting expands the factored lag polynomials
//! into a single ARMA recursion on the undifferenced series and derives the
//! interval width from its psi weights.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, instrument};

use crate::error::{ModelError, Result};
use crate::forecaster::{IntervalForecast, IntervalForecaster};
use crate::frequency::Frequency;

/// Non-seasonal order `(p, d, q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

/// Seasonal order `(P, D, Q, s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeasonalOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub period: usize,
}

impl SeasonalOrder {
    pub fn is_seasonal(&self) -> bool {
        self.p > 0 || self.d > 0 || self.q > 0
    }
}

/// Trained seasonal ARIMA model with the state needed to forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SarimaxModel {
    pub order: Order,
    #[serde(default)]
    pub seasonal_order: SeasonalOrder,
    /// Non-seasonal AR coefficients `phi_1..phi_p`.
    #[serde(default)]
    pub ar: Vec<f64>,
    /// Non-seasonal MA coefficients `theta_1..theta_q`.
    #[serde(default)]
    pub ma: Vec<f64>,
    /// Seasonal AR coefficients `Phi_1..Phi_P`.
    #[serde(default)]
    pub seasonal_ar: Vec<f64>,
    /// Seasonal MA coefficients `Theta_1..Theta_Q`.
    #[serde(default)]
    pub seasonal_ma: Vec<f64>,
    /// Constant added at every step of the expanded recursion.
    #[serde(default)]
    pub intercept: f64,
    /// Innovation variance.
    pub sigma2: f64,
    pub frequency: Frequency,
    /// Timestamp of the last value in `history`.
    pub last_observed: NaiveDateTime,
    /// Most recent observations, oldest first.
    pub history: Vec<f64>,
    /// In-sample residuals aligned with the tail of `history`.
    #[serde(default)]
    pub residuals: Vec<f64>,
}

/// Factored model expanded into `y[t] = c + sum(a_i * y[t-i]) + e[t] + sum(b_j * e[t-j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedArma {
    /// `a_1..a_n`, index 0 is lag 1.
    pub ar: Vec<f64>,
    /// `b_1..b_m`, index 0 is lag 1.
    pub ma: Vec<f64>,
}

impl ExpandedArma {
    /// MA(infinity) representation of the recursion, `psi_0 = 1`.
    pub fn psi_weights(&self, count: usize) -> Vec<f64> {
        let mut psi = Vec::with_capacity(count);
        for j in 0..count {
            if j == 0 {
                psi.push(1.0);
                continue;
            }
            let mut value = self.ma.get(j - 1).copied().unwrap_or(0.0);
            for (i, a) in self.ar.iter().enumerate().take(j) {
                value += a * psi[j - 1 - i];
            }
            psi.push(value);
        }
        psi
    }
}

/// Product of two lag polynomials; index is the lag.
fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// `1 + sign * sum(c_k * B^(k * period))`.
fn lag_poly(coefs: &[f64], period: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coefs.len() * period + 1];
    poly[0] = 1.0;
    for (k, c) in coefs.iter().enumerate() {
        poly[(k + 1) * period] = sign * c;
    }
    poly
}

/// `(1 - B^period)^order`.
fn diff_poly(order: usize, period: usize) -> Vec<f64> {
    let step = lag_poly(&[1.0], period, -1.0);
    (0..order).fold(vec![1.0], |acc, _| poly_mul(&acc, &step))
}

impl SarimaxModel {
    /// Check that coefficients, orders and state agree with each other.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("ar", self.ar.len(), self.order.p),
            ("ma", self.ma.len(), self.order.q),
            ("seasonal_ar", self.seasonal_ar.len(), self.seasonal_order.p),
            ("seasonal_ma", self.seasonal_ma.len(), self.seasonal_order.q),
        ];
        for (name, got, expected) in counts {
            if got != expected {
                return Err(ModelError::Invalid(format!(
                    "{} has {} coefficients, order requires {}",
                    name, got, expected
                )));
            }
        }

        if self.seasonal_order.is_seasonal() && self.seasonal_order.period < 2 {
            return Err(ModelError::Invalid(format!(
                "seasonal period must be at least 2, got {}",
                self.seasonal_order.period
            )));
        }

        if !self.sigma2.is_finite() || self.sigma2 < 0.0 {
            return Err(ModelError::Invalid(format!(
                "sigma2 must be finite and non-negative, got {}",
                self.sigma2
            )));
        }

        let all_finite = std::iter::once(&self.intercept)
            .chain(&self.ar)
            .chain(&self.ma)
            .chain(&self.seasonal_ar)
            .chain(&self.seasonal_ma)
            .chain(&self.history)
            .chain(&self.residuals)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::Invalid("non-finite value in model parameters or state".to_string()));
        }

        let required = self.expanded_ar_order().max(1);
        if self.history.len() < required {
            return Err(ModelError::Invalid(format!(
                "history has {} observations, at least {} required",
                self.history.len(),
                required
            )));
        }

        if self.residuals.len() > self.history.len() {
            return Err(ModelError::Invalid(format!(
                "{} residuals for {} observations",
                self.residuals.len(),
                self.history.len()
            )));
        }

        Ok(())
    }

    /// Highest lag of the expanded autoregressive polynomial.
    pub fn expanded_ar_order(&self) -> usize {
        let s = if self.seasonal_order.is_seasonal() { self.seasonal_order.period } else { 0 };
        self.order.p + self.order.d + (self.seasonal_order.p + self.seasonal_order.d) * s
    }

    /// Expand the factored lag polynomials into a single ARMA recursion.
    pub fn expand(&self) -> ExpandedArma {
        let s = self.seasonal_order.period.max(1);

        let ar_poly = [
            lag_poly(&self.ar, 1, -1.0),
            lag_poly(&self.seasonal_ar, s, -1.0),
            diff_poly(self.order.d, 1),
            diff_poly(self.seasonal_order.d, s),
        ]
        .iter()
        .fold(vec![1.0], |acc, p| poly_mul(&acc, p));

        let ma_poly = poly_mul(&lag_poly(&self.ma, 1, 1.0), &lag_poly(&self.seasonal_ma, s, 1.0));

        ExpandedArma {
            ar: ar_poly.iter().skip(1).map(|c| -c).collect(),
            ma: ma_poly.iter().skip(1).copied().collect(),
        }
    }

    /// Point forecast for `steps` future steps.
    pub fn point_forecast(&self, steps: usize) -> Vec<f64> {
        let arma = self.expand();
        let n = self.history.len();

        let mut values = Vec::with_capacity(n + steps);
        values.extend_from_slice(&self.history);

        let residuals = &self.residuals[self.residuals.len().saturating_sub(n)..];
        let mut errors = vec![0.0; n - residuals.len()];
        errors.extend_from_slice(residuals);
        errors.reserve(steps);

        for _ in 0..steps {
            let t = values.len();
            let mut next = self.intercept;
            for (i, a) in arma.ar.iter().enumerate() {
                if let Some(y) = t.checked_sub(i + 1).map(|idx| values[idx]) {
                    next += a * y;
                }
            }
            for (j, b) in arma.ma.iter().enumerate() {
                if let Some(e) = t.checked_sub(j + 1).map(|idx| errors[idx]) {
                    next += b * e;
                }
            }
            values.push(next);
            errors.push(0.0);
        }

        values.split_off(n)
    }
}

impl std::fmt::Display for SarimaxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SARIMAX({},{},{})", self.order.p, self.order.d, self.order.q)?;
        if self.seasonal_order.is_seasonal() {
            write!(
                f,
                "x({},{},{},{})",
                self.seasonal_order.p, self.seasonal_order.d, self.seasonal_order.q, self.seasonal_order.period
            )?;
        }
        Ok(())
    }
}

impl IntervalForecaster for SarimaxModel {
    fn frequency(&self) -> Frequency {
        self.frequency
    }

    fn forecast_origin(&self) -> NaiveDateTime {
        self.frequency.advance(self.last_observed, 1)
    }

    #[instrument(skip(self), fields(model = %self))]
    fn conf_int(&self, steps: usize, alpha: f64) -> Result<IntervalForecast> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ModelError::Forecast(format!("alpha must lie in (0, 1), got {}", alpha)));
        }
        if steps == 0 {
            return Ok(IntervalForecast::default());
        }

        let normal = Normal::new(0.0, 1.0).map_err(|e| ModelError::Forecast(e.to_string()))?;
        let z = normal.inverse_cdf(1.0 - alpha / 2.0);
        debug!(steps, alpha, z, "Computing forecast interval");

        let mean = self.point_forecast(steps);
        let psi = self.expand().psi_weights(steps);
        let origin = self.forecast_origin();

        let mut forecast = IntervalForecast {
            timestamps: Vec::with_capacity(steps),
            mean: Vec::with_capacity(steps),
            lower: Vec::with_capacity(steps),
            upper: Vec::with_capacity(steps),
        };

        let mut psi_sq_sum = 0.0;
        for (h, (m, w)) in mean.into_iter().zip(psi).enumerate() {
            psi_sq_sum += w * w;
            let half_width = z * (self.sigma2 * psi_sq_sum).sqrt();
            forecast.timestamps.push(self.frequency.advance(origin, h));
            forecast.mean.push(m);
            forecast.lower.push(m - half_width);
            forecast.upper.push(m + half_width);
        }

        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn model(order: Order, seasonal_order: SeasonalOrder) -> SarimaxModel {
        SarimaxModel {
            order,
            seasonal_order,
            ar: vec![],
            ma: vec![],
            seasonal_ar: vec![],
            seasonal_ma: vec![],
            intercept: 0.0,
            sigma2: 1.0,
            frequency: Frequency::Hourly,
            last_observed: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().and_hms_opt(23, 0, 0).unwrap(),
            history: vec![10.0; 8],
            residuals: vec![],
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_expand_first_difference() {
        let m = model(Order { p: 0, d: 1, q: 0 }, SeasonalOrder::default());
        assert_eq!(m.expand().ar, vec![1.0]);
        assert!(m.expand().ma.is_empty());
    }

    #[test]
    fn test_expand_seasonal_difference() {
        let m = model(Order::default(), SeasonalOrder { p: 0, d: 1, q: 0, period: 4 });
        assert_eq!(m.expand().ar, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.expanded_ar_order(), 4);
    }

    #[test]
    fn test_expand_multiplicative_ar() {
        let mut m = model(Order { p: 1, d: 0, q: 1 }, SeasonalOrder { p: 1, d: 0, q: 1, period: 4 });
        m.ar = vec![0.5];
        m.seasonal_ar = vec![0.3];
        m.ma = vec![0.2];
        m.seasonal_ma = vec![0.4];

        let arma = m.expand();
        let expected_ar = [0.5, 0.0, 0.0, 0.3, -0.15];
        assert_eq!(arma.ar.len(), expected_ar.len());
        for (got, want) in arma.ar.iter().zip(expected_ar) {
            assert!(close(*got, want), "{} != {}", got, want);
        }
        let expected_ma = [0.2, 0.0, 0.0, 0.4, 0.08];
        for (got, want) in arma.ma.iter().zip(expected_ma) {
            assert!(close(*got, want), "{} != {}", got, want);
        }
    }

    #[test]
    fn test_random_walk_forecast_is_flat_with_growing_interval() {
        let mut m = model(Order { p: 0, d: 1, q: 0 }, SeasonalOrder::default());
        m.history = vec![3.0, 5.0, 7.5];

        let fc = m.conf_int(4, 0.05).unwrap();
        assert_eq!(fc.len(), 4);
        assert!(fc.mean.iter().all(|v| close(*v, 7.5)));

        // psi weights of a random walk are all one, so variance grows linearly
        let psi = m.expand().psi_weights(5);
        assert!(psi.iter().all(|w| close(*w, 1.0)));

        let width = |h: usize| fc.upper[h] - fc.lower[h];
        assert!(close(width(3) / width(0), 2.0));
        assert!((width(0) / 2.0 - 1.959964).abs() < 1e-5);
    }

    #[test]
    fn test_ar1_reverts_to_long_run_mean() {
        let mut m = model(Order { p: 1, d: 0, q: 0 }, SeasonalOrder::default());
        m.ar = vec![0.5];
        m.intercept = 2.0;
        m.history = vec![20.0];

        let fc = m.point_forecast(60);
        assert!(close(fc[0], 12.0));
        assert!((fc[59] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_ma1_uses_last_residual_once() {
        let mut m = model(Order { p: 0, d: 0, q: 1 }, SeasonalOrder::default());
        m.ma = vec![0.5];
        m.intercept = 1.0;
        m.history = vec![1.0, 1.0];
        m.residuals = vec![0.0, 2.0];

        let fc = m.point_forecast(3);
        assert!(close(fc[0], 2.0));
        assert!(close(fc[1], 1.0));
        assert!(close(fc[2], 1.0));
    }

    #[test]
    fn test_seasonal_naive_repeats_last_season() {
        let mut m = model(Order::default(), SeasonalOrder { p: 0, d: 1, q: 0, period: 4 });
        m.history = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(m.point_forecast(6), vec![1.0, 2.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_timestamps_start_at_origin() {
        let m = model(Order { p: 0, d: 1, q: 0 }, SeasonalOrder::default());
        let fc = m.conf_int(3, 0.05).unwrap();
        let origin = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(m.forecast_origin(), origin);
        assert_eq!(fc.timestamps[0], origin);
        assert_eq!(fc.timestamps[2], origin + chrono::Duration::hours(2));
    }

    #[test]
    fn test_bounds_are_ordered() {
        let mut m = model(Order { p: 1, d: 1, q: 1 }, SeasonalOrder { p: 1, d: 1, q: 1, period: 4 });
        m.ar = vec![0.4];
        m.ma = vec![-0.3];
        m.seasonal_ar = vec![0.2];
        m.seasonal_ma = vec![-0.5];
        m.sigma2 = 2.5;
        m.history = (0..16).map(|i| 10.0 + (i % 4) as f64).collect();
        m.validate().unwrap();

        let fc = m.conf_int(48, 0.05).unwrap();
        for (lo, (mid, hi)) in fc.lower.iter().zip(fc.mean.iter().zip(fc.upper.iter())) {
            assert!(lo <= mid && mid <= hi);
        }
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let m = model(Order { p: 0, d: 1, q: 0 }, SeasonalOrder::default());
        assert!(m.conf_int(0, 0.05).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_alpha() {
        let m = model(Order { p: 0, d: 1, q: 0 }, SeasonalOrder::default());
        assert!(matches!(m.conf_int(5, 0.0), Err(ModelError::Forecast(_))));
        assert!(matches!(m.conf_int(5, 1.0), Err(ModelError::Forecast(_))));
    }

    #[test]
    fn test_validate_rejects_coefficient_mismatch() {
        let m = model(Order { p: 2, d: 0, q: 0 }, SeasonalOrder::default());
        assert!(matches!(m.validate(), Err(ModelError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_short_history() {
        let mut m = model(Order::default(), SeasonalOrder { p: 0, d: 1, q: 0, period: 24 });
        m.history = vec![1.0; 23];
        assert!(matches!(m.validate(), Err(ModelError::Invalid(_))));
        m.history = vec![1.0; 24];
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sigma() {
        let mut m = model(Order { p: 0, d: 1, q: 0 }, SeasonalOrder::default());
        m.sigma2 = -1.0;
        assert!(m.validate().is_err());
        m.sigma2 = f64::NAN;
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_display() {
        let m = model(Order { p: 1, d: 0, q: 1 }, SeasonalOrder { p: 1, d: 1, q: 1, period: 24 });
        assert_eq!(m.to_string(), "SARIMAX(1,0,1)x(1,1,1,24)");
        let m = model(Order { p: 2, d: 1, q: 0 }, SeasonalOrder::default());
        assert_eq!(m.to_string(), "SARIMAX(2,1,0)");
    }
}
