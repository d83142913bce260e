//! # Chromatogram Views
//!
//! Read-only projections of an [`ExtractedChromatogram`], computed on demand from its
//! centroid list so they can never go stale.
//!
//! - **Ion chromatogram**: summed intensity per retention time (one point per scan)
//! - **m/z view**: every centroid as a (time, m/z) pair, showing the shape of the
//!   isotope/elution envelope
//! - **Ion count**: total intensity of the whole chromatogram

use serde::Serialize;

use crate::engine::ExtractedChromatogram;

/// Summed intensity over retention time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IonChromatogram {
    /// Distinct retention times, ascending
    pub times: Vec<f64>,
    /// Summed intensity at each time
    pub intensities: Vec<f64>,
}

impl IonChromatogram {
    /// Number of points
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the chromatogram has no points
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Unaggregated (time, m/z) scatter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MzView {
    /// Time of each centroid
    pub times: Vec<f64>,
    /// m/z of each centroid
    pub mzs: Vec<f64>,
}

/// (time, m/z) scatter with a color value per point
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColoredMzView {
    /// Time of each centroid
    pub times: Vec<f64>,
    /// m/z of each centroid
    pub mzs: Vec<f64>,
    /// Intensity of each centroid, log transformed when a base was given
    pub colors: Vec<f64>,
}

impl ExtractedChromatogram {
    /// Total ion count over all centroids
    pub fn ion_count(&self) -> f64 {
        self.centroids().iter().map(|c| c.intensity).sum()
    }

    /// Summed intensity per scan time
    ///
    /// Centroids are grouped by retention time (they arrive scan by scan, so equal
    /// times are adjacent). Grouping is never done by m/z.
    pub fn ion_chromatogram(&self) -> IonChromatogram {
        let mut view = IonChromatogram::default();
        for centroid in self.centroids() {
            if view.times.last() == Some(&centroid.time) {
                if let Some(sum) = view.intensities.last_mut() {
                    *sum += centroid.intensity;
                }
            } else {
                view.times.push(centroid.time);
                view.intensities.push(centroid.intensity);
            }
        }
        view
    }

    /// One (time, m/z) pair per centroid
    pub fn mz_view(&self) -> MzView {
        MzView {
            times: self.times(),
            mzs: self.mzs(),
        }
    }

    /// The m/z view with per-point colors, optionally `log_base(intensity)`
    pub fn mz_view_with_colors(&self, log_base: Option<f64>) -> ColoredMzView {
        let colors = self
            .centroids()
            .iter()
            .map(|c| match log_base {
                Some(base) => c.intensity.log(base),
                None => c.intensity,
            })
            .collect();

        ColoredMzView {
            times: self.times(),
            mzs: self.mzs(),
            colors,
        }
    }

    /// Highest summed intensity of the ion chromatogram
    pub fn max_intensity(&self) -> Option<f64> {
        self.ion_chromatogram()
            .intensities
            .into_iter()
            .reduce(f64::max)
    }
}
