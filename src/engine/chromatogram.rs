use crate::centroid::Centroid;
use crate::window::{TimeBound, Window};

/// The centroids matched into one window from one spectrum source
///
/// Centroids are kept in scan order, so their times never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedChromatogram {
    source: String,
    window: Window,
    centroids: Vec<Centroid>,
}

impl ExtractedChromatogram {
    /// Create a chromatogram from already matched centroids
    pub fn new(source: impl Into<String>, window: Window, centroids: Vec<Centroid>) -> Self {
        Self {
            source: source.into(),
            window,
            centroids,
        }
    }

    pub(crate) fn empty(source: impl Into<String>, window: Window) -> Self {
        Self::new(source, window, Vec::new())
    }

    pub(crate) fn push(&mut self, centroid: Centroid) {
        self.centroids.push(centroid);
    }

    /// Identifier of the spectrum source
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The window this chromatogram was extracted for
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Matched centroids in scan order
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// Consume the chromatogram, returning its centroids
    pub fn into_centroids(self) -> Vec<Centroid> {
        self.centroids
    }

    /// Number of matched centroids
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Lower m/z bound of the window
    pub fn mz_start(&self) -> f64 {
        self.window.mz().lower
    }

    /// Upper m/z bound of the window
    pub fn mz_end(&self) -> f64 {
        self.window.mz().upper
    }

    /// Lower time bound of the window
    pub fn time_start(&self) -> f64 {
        self.window.time().lower
    }

    /// Upper time bound of the window
    pub fn time_end(&self) -> TimeBound {
        self.window.time().upper
    }

    /// Time of the first matched centroid
    pub fn min_time(&self) -> Option<f64> {
        self.centroids.first().map(|c| c.time)
    }

    /// Time of the last matched centroid
    pub fn max_time(&self) -> Option<f64> {
        self.centroids.last().map(|c| c.time)
    }

    /// Time of every centroid
    pub fn times(&self) -> Vec<f64> {
        self.centroids.iter().map(|c| c.time).collect()
    }

    /// Scan number of every centroid
    pub fn scan_numbers(&self) -> Vec<i64> {
        self.centroids.iter().map(|c| c.scan_number).collect()
    }

    /// m/z of every centroid
    pub fn mzs(&self) -> Vec<f64> {
        self.centroids.iter().map(|c| c.mz).collect()
    }
}
