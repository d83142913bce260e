//! Matched data points.

use std::fmt;

use serde::Serialize;

/// One (m/z, intensity) point matched into an extraction window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Centroid {
    /// Scan number parsed from the spectrum identifier
    pub scan_number: i64,
    /// Retention time in seconds
    pub time: f64,
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Signal intensity
    pub intensity: f64,
}

impl Centroid {
    /// Create a new centroid
    pub fn new(scan_number: i64, time: f64, mz: f64, intensity: f64) -> Self {
        Self {
            scan_number,
            time,
            mz,
            intensity,
        }
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}:{}(s) {}m/z {}>",
            self.scan_number, self.time, self.mz, self.intensity
        )
    }
}
