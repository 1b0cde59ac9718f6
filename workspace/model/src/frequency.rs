use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Native time unit of a model: the spacing between two consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
}

impl Frequency {
    /// Length of one step.
    pub fn step(&self) -> Duration {
        match self {
            Frequency::Hourly => Duration::hours(1),
            Frequency::Daily => Duration::days(1),
        }
    }

    /// Number of native steps contained in a whole number of days.
    pub fn steps_per_day(&self) -> i64 {
        match self {
            Frequency::Hourly => 24,
            Frequency::Daily => 1,
        }
    }

    /// Number of whole steps needed to move from `from` to at least `to`.
    ///
    /// Returns 0 when `to` is not after `from`.
    pub fn steps_until(&self, from: NaiveDateTime, to: NaiveDateTime) -> usize {
        if to <= from {
            return 0;
        }
        let span = (to - from).num_seconds();
        let step = self.step().num_seconds();
        ((span + step - 1) / step) as usize
    }

    /// Timestamp reached after `steps` steps from `origin`.
    pub fn advance(&self, origin: NaiveDateTime, steps: usize) -> NaiveDateTime {
        origin + self.step() * steps as i32
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Hourly => write!(f, "hourly"),
            Frequency::Daily => write!(f, "daily"),
        }
    }
}
