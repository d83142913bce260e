use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::window::MzRange;

/// How matching m/z positions are located in a spectrum
///
/// Both methods return the same indices for spectra whose m/z values are finite and
/// ascending, as [`crate::source::ScanRecord::mzs`] requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MzSelection {
    /// Test every point
    Linear,
    /// Bisect the sorted m/z array for the range bounds
    #[default]
    BinarySearch,
}

impl MzSelection {
    /// Indices of `mzs` that fall inside `range`, ascending
    pub fn select(&self, mzs: &[f64], range: &MzRange) -> Vec<usize> {
        match self {
            MzSelection::Linear => mzs
                .iter()
                .enumerate()
                .filter(|&(_, &mz)| range.contains(mz))
                .map(|(i, _)| i)
                .collect(),
            MzSelection::BinarySearch => {
                let start = mzs.partition_point(|&mz| mz < range.lower);
                let end = start + mzs[start..].partition_point(|&mz| mz <= range.upper);
                (start..end).collect()
            }
        }
    }
}

impl fmt::Display for MzSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MzSelection::Linear => write!(f, "linear"),
            MzSelection::BinarySearch => write!(f, "binary-search"),
        }
    }
}

impl FromStr for MzSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(MzSelection::Linear),
            "binary-search" | "binary" => Ok(MzSelection::BinarySearch),
            _ => Err(format!(
                "Unknown m/z selection '{}'. Valid options: linear, binary-search",
                s
            )),
        }
    }
}

/// Configuration for an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtractionConfig {
    /// m/z selection method
    pub selection: MzSelection,

    /// Drop matched points whose intensity is zero
    pub skip_zero_intensity: bool,
}

impl ExtractionConfig {
    /// Set the selection method
    pub fn with_selection(mut self, selection: MzSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Drop zero-intensity points
    pub fn with_skip_zero_intensity(mut self, skip: bool) -> Self {
        self.skip_zero_intensity = skip;
        self
    }
}
