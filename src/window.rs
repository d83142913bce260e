//! # Extraction Windows
//!
//! A [`Window`] is the (m/z range, retention time range) region an extracted ion
//! chromatogram is built for. Windows are validated once at construction and are
//! immutable afterwards, so the same window list can be matched against any number
//! of spectrum sources.
//!
//! Windows are usually written as text on the command line or in a config file:
//!
//! ```text
//! 500.0:500.2            m/z 500.0-500.2, whole run
//! 500.0:500.2,60:300     m/z 500.0-500.2, 60-300 s
//! 500.0:500.2,60         m/z 500.0-500.2, 60 s to end of run
//! 500.1                  500.1 +/- global m/z window, whole run
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Dimension of a window range, used in error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Mass-to-charge dimension
    Mz,
    /// Retention time dimension
    Time,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Mz => write!(f, "m/z"),
            Dimension::Time => write!(f, "time"),
        }
    }
}

/// Errors that can occur while building a window
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WindowError {
    /// Lower bound exceeds upper bound (or a bound is NaN)
    #[error("Invalid {dimension} range: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange {
        /// Which range was invalid
        dimension: Dimension,
        /// Lower bound as given
        lower: f64,
        /// Upper bound as given
        upper: f64,
    },

    /// Window text could not be parsed
    #[error("Invalid window specification '{spec}': {reason}")]
    Parse {
        /// The offending specification
        spec: String,
        /// What went wrong
        reason: String,
    },

    /// A single m/z value was given without a global m/z window
    #[error("Window '{0}' gives a single m/z value but no global m/z window was set")]
    MissingTolerance(String),
}

/// Upper bound of a retention time range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeBound {
    /// Inclusive upper bound in seconds
    Bounded(f64),
    /// Until the end of the run
    Unbounded,
}

impl TimeBound {
    /// The bound as a float, with `Unbounded` mapped to positive infinity
    pub fn as_f64(&self) -> f64 {
        match self {
            TimeBound::Bounded(v) => *v,
            TimeBound::Unbounded => f64::INFINITY,
        }
    }

    /// Whether this is `Unbounded`
    pub fn is_unbounded(&self) -> bool {
        matches!(self, TimeBound::Unbounded)
    }
}

impl From<f64> for TimeBound {
    /// Positive infinity becomes `Unbounded`, everything else is `Bounded`
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            TimeBound::Unbounded
        } else {
            TimeBound::Bounded(value)
        }
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBound::Bounded(v) => write!(f, "{}", v),
            TimeBound::Unbounded => write!(f, "inf"),
        }
    }
}

impl Serialize for TimeBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TimeBound::Bounded(v) => serializer.serialize_f64(*v),
            TimeBound::Unbounded => serializer.serialize_none(),
        }
    }
}

/// Inclusive m/z range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MzRange {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

impl MzRange {
    /// Check whether `mz` lies inside the range
    #[inline]
    pub fn contains(&self, mz: f64) -> bool {
        self.lower <= mz && mz <= self.upper
    }
}

/// Retention time range in seconds, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive), possibly unbounded
    pub upper: TimeBound,
}

impl TimeRange {
    /// The whole run: `[0, +inf)`
    pub fn whole_run() -> Self {
        Self {
            lower: 0.0,
            upper: TimeBound::Unbounded,
        }
    }

    /// Check whether `time` lies inside the range
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        if time < self.lower {
            return false;
        }
        match self.upper {
            TimeBound::Bounded(upper) => time <= upper,
            TimeBound::Unbounded => true,
        }
    }

    /// Whether `time` is strictly past the upper bound
    #[inline]
    pub fn is_passed_by(&self, time: f64) -> bool {
        match self.upper {
            TimeBound::Bounded(upper) => time > upper,
            TimeBound::Unbounded => false,
        }
    }
}

/// An (m/z, time) region of interest to extract
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Window {
    mz: MzRange,
    time: TimeRange,
}

impl Window {
    /// Create a window, validating both ranges
    pub fn new(
        mz_lower: f64,
        mz_upper: f64,
        time_lower: f64,
        time_upper: TimeBound,
    ) -> Result<Self, WindowError> {
        if mz_lower.is_nan() || mz_upper.is_nan() || mz_lower > mz_upper {
            return Err(WindowError::InvalidRange {
                dimension: Dimension::Mz,
                lower: mz_lower,
                upper: mz_upper,
            });
        }

        let time_invalid = time_lower.is_nan()
            || match time_upper {
                TimeBound::Bounded(upper) => upper.is_nan() || time_lower > upper,
                TimeBound::Unbounded => false,
            };
        if time_invalid {
            return Err(WindowError::InvalidRange {
                dimension: Dimension::Time,
                lower: time_lower,
                upper: time_upper.as_f64(),
            });
        }

        Ok(Self {
            mz: MzRange {
                lower: mz_lower,
                upper: mz_upper,
            },
            time: TimeRange {
                lower: time_lower,
                upper: time_upper,
            },
        })
    }

    /// Create a window covering the whole run
    pub fn mz_only(mz_lower: f64, mz_upper: f64) -> Result<Self, WindowError> {
        Self::new(mz_lower, mz_upper, 0.0, TimeBound::Unbounded)
    }

    /// Parse a window from text, expanding single m/z values by `global_mz_window`
    ///
    /// Accepted forms are `mz_start:mz_end[,time_start[:time_end]]` and
    /// `mz[,time_start[:time_end]]`. An omitted time range means the whole run and an
    /// omitted end time means the end of the run.
    pub fn parse(spec: &str, global_mz_window: Option<f64>) -> Result<Self, WindowError> {
        let trimmed = spec.trim();
        let (mz_part, time_part) = match trimmed.split_once(',') {
            Some((mz, time)) => (mz, Some(time)),
            None => (trimmed, None),
        };

        let (mz_lower, mz_upper) = match mz_part.split_once(':') {
            Some((lower, upper)) => (parse_value(spec, lower)?, parse_value(spec, upper)?),
            None => {
                let center = parse_value(spec, mz_part)?;
                let tolerance = global_mz_window
                    .ok_or_else(|| WindowError::MissingTolerance(spec.to_string()))?;
                (center - tolerance, center + tolerance)
            }
        };

        let (time_lower, time_upper) = match time_part {
            None => (0.0, TimeBound::Unbounded),
            Some(time) => match time.split_once(':') {
                Some((lower, upper)) if upper.trim().is_empty() => {
                    (parse_value(spec, lower)?, TimeBound::Unbounded)
                }
                Some((lower, upper)) => (
                    parse_value(spec, lower)?,
                    TimeBound::from(parse_value(spec, upper)?),
                ),
                None => (parse_value(spec, time)?, TimeBound::Unbounded),
            },
        };

        Self::new(mz_lower, mz_upper, time_lower, time_upper)
    }

    /// The m/z range
    pub fn mz(&self) -> &MzRange {
        &self.mz
    }

    /// The retention time range
    pub fn time(&self) -> &TimeRange {
        &self.time
    }

    /// Whether `time` falls inside the time range
    #[inline]
    pub fn contains_time(&self, time: f64) -> bool {
        self.time.contains(time)
    }

    /// Whether `mz` falls inside the m/z range
    #[inline]
    pub fn contains_mz(&self, mz: f64) -> bool {
        self.mz.contains(mz)
    }

    /// Whether a spectrum at `time` has moved past this window for good
    #[inline]
    pub fn is_finished_at(&self, time: f64) -> bool {
        self.time.is_passed_by(time)
    }
}

impl FromStr for Window {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}mz,{}:{}(s)",
            self.mz.lower, self.mz.upper, self.time.lower, self.time.upper
        )
    }
}

fn parse_value(spec: &str, text: &str) -> Result<f64, WindowError> {
    text.trim().parse::<f64>().map_err(|e| WindowError::Parse {
        spec: spec.to_string(),
        reason: format!("'{}' is not a number ({})", text.trim(), e),
    })
}
