use core::str::FromStr;

use crate::CastError;

// -----------------------------------------------------------------------------
// TimeUnit

/// The unit of a bare number read as a duration or an epoch timestamp.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Length of one unit in nanoseconds.
    pub const fn nanos(self) -> u64 {
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => 1_000,
            Self::Milliseconds => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Hours => 3_600_000_000_000,
        }
    }

    /// The duration suffix of the unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CastError;

    /// Parses a duration suffix. Both micro signs are accepted for `µs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ns" => Self::Nanoseconds,
            "us" | "\u{b5}s" | "\u{3bc}s" => Self::Microseconds,
            "ms" => Self::Milliseconds,
            "s" => Self::Seconds,
            "m" => Self::Minutes,
            "h" => Self::Hours,
            _ => {
                return Err(CastError::ParseDuration {
                    input: s.to_owned(),
                    reason: "unknown unit",
                });
            }
        })
    }
}

// -----------------------------------------------------------------------------
// CastOptions

/// Per-call options of the time casts.
///
/// # Examples
///
/// ```
/// use vc_coerce::{CastOptions, TimeUnit};
///
/// let options = CastOptions::new().with_unit(TimeUnit::Seconds);
/// assert_eq!(options.unit(), TimeUnit::Seconds);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CastOptions {
    unit: TimeUnit,
}

impl CastOptions {
    /// Options with nanosecond numbers.
    pub const fn new() -> Self {
        Self {
            unit: TimeUnit::Nanoseconds,
        }
    }

    /// Sets the unit of numbers read as durations or timestamps.
    pub const fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    #[inline]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }
}
