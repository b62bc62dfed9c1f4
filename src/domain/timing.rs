//! Phase durations for thinking and eating.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

/// Default thinking range: 2 to 4 seconds.
pub const DEFAULT_THINK_TIMING: PhaseTiming =
    PhaseTiming::from_millis(2000, 4000);

/// Default eating range: 2 to 3 seconds.
pub const DEFAULT_EAT_TIMING: PhaseTiming = PhaseTiming::from_millis(2000, 3000);

/// Default wall-clock length of a simulation run.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(20);

/// An inclusive `[min, max]` range a phase duration is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub min: Duration,
    pub max: Duration,
}

impl PhaseTiming {
    /// Creates a range from two durations. Use [`PhaseTiming::is_valid`] to
    /// check `min <= max` before sampling.
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self::new(Duration::from_millis(min), Duration::from_millis(max))
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Draws a duration uniformly from the range.
    ///
    /// # Panics
    /// Panics if `min > max`. [`Simulation::new`](crate::lifecycle::Simulation::new)
    /// rejects such ranges before any philosopher samples them.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        rng.gen_range(self.min..=self.max)
    }
}

impl fmt::Display for PhaseTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min.as_millis(), self.max.as_millis())
    }
}

/// Errors from parsing a `MIN-MAX` millisecond range.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseTimingError {
    #[error("expected MIN-MAX in milliseconds, got `{0}`")]
    Format(String),

    #[error("invalid millisecond value `{0}`")]
    Number(String),

    #[error("minimum {min}ms is greater than maximum {max}ms")]
    Inverted { min: u64, max: u64 },
}

impl FromStr for PhaseTiming {
    type Err = ParseTimingError;

    /// Parses `"2000-4000"`. A single value such as `"50"` means a fixed duration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (min, max) = match s.split_once('-') {
            Some((min, max)) => (min.trim(), max.trim()),
            None => (s, s),
        };
        if min.is_empty() || max.is_empty() {
            return Err(ParseTimingError::Format(s.to_string()));
        }

        let parse = |v: &str| {
            v.parse::<u64>()
                .map_err(|_| ParseTimingError::Number(v.to_string()))
        };
        let (min, max) = (parse(min)?, parse(max)?);
        if min > max {
            return Err(ParseTimingError::Inverted { min, max });
        }

        Ok(Self::from_millis(min, max))
    }
}
