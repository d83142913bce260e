//! # Spectrum Sources
//!
//! The extraction engine does not know about file formats. It reads spectra through
//! the [`SpectrumSource`] trait, one record at a time and in acquisition order, and
//! only looks at the fields exposed by [`ScanRecord`].
//!
//! Two sources ship with the crate:
//!
//! - [`MemorySource`]: spectra already decoded into memory, built with
//!   [`SpectrumBuilder`]
//! - [`crate::mzml::MzMLSource`]: a streaming mzML reader (behind the `mzml` feature)

use std::convert::Infallible;
use std::error::Error;

/// A single scan as seen by the extraction engine
///
/// `mzs` and `intensities` are parallel arrays sorted by m/z. Implementations must
/// not yield NaN or infinite m/z values: binary-search selection assumes a total order.
pub trait ScanRecord {
    /// Native spectrum identifier, e.g. `controllerType=0 controllerNumber=1 scan=102`
    fn id(&self) -> &str;

    /// MS level (1 for survey scans)
    fn ms_level(&self) -> i16;

    /// Retention time in seconds, if known
    fn retention_time(&self) -> Option<f64>;

    /// m/z values, finite and ascending
    fn mzs(&self) -> &[f64];

    /// Intensities, parallel to [`ScanRecord::mzs`]
    fn intensities(&self) -> &[f64];

    /// Scan number embedded in the identifier
    fn scan_number(&self) -> Option<i64> {
        scan_number_from_id(self.id())
    }
}

/// A sequential, fallible stream of spectra
pub trait SpectrumSource {
    /// Record type yielded by the source
    type Spectrum: ScanRecord;

    /// Error raised when the source cannot be read
    type Error: Error + Send + Sync + 'static;

    /// Name of the source (usually the file path)
    fn identifier(&self) -> &str;

    /// Read the next spectrum, `Ok(None)` at the end of the run
    fn next_spectrum(&mut self) -> Result<Option<Self::Spectrum>, Self::Error>;
}

/// Extract the scan number from a native spectrum identifier
///
/// Recognizes `scan=<digits>` anywhere in the id and the `S<digits>` short form.
pub fn scan_number_from_id(id: &str) -> Option<i64> {
    if let Some(pos) = id.find("scan=") {
        let start = pos + 5;
        let end = id[start..]
            .find(|c: char| !c.is_ascii_digit())
            .map(|i| start + i)
            .unwrap_or(id.len());
        id[start..end].parse().ok()
    } else if let Some(rest) = id.strip_prefix('S') {
        rest.parse().ok()
    } else {
        None
    }
}

/// A decoded spectrum held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySpectrum {
    /// Native spectrum identifier
    pub id: String,
    /// MS level
    pub ms_level: i16,
    /// Retention time in seconds
    pub retention_time: Option<f64>,
    /// m/z array
    pub mz_array: Vec<f64>,
    /// Intensity array
    pub intensity_array: Vec<f64>,
}

impl ScanRecord for MemorySpectrum {
    fn id(&self) -> &str {
        &self.id
    }

    fn ms_level(&self) -> i16 {
        self.ms_level
    }

    fn retention_time(&self) -> Option<f64> {
        self.retention_time
    }

    fn mzs(&self) -> &[f64] {
        &self.mz_array
    }

    fn intensities(&self) -> &[f64] {
        &self.intensity_array
    }
}

/// Builder for [`MemorySpectrum`]
///
/// ```
/// use mzxic::source::SpectrumBuilder;
///
/// let spectrum = SpectrumBuilder::new("scan=102")
///     .ms_level(1)
///     .retention_time(2.0)
///     .add_peak(750.0, 50.0)
///     .add_peak(500.1, 1000.0)
///     .build();
///
/// assert_eq!(spectrum.mz_array, vec![500.1, 750.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SpectrumBuilder {
    id: String,
    ms_level: i16,
    retention_time: Option<f64>,
    peaks: Vec<(f64, f64)>,
}

impl SpectrumBuilder {
    /// Start a new MS1 spectrum with the given identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ms_level: 1,
            retention_time: None,
            peaks: Vec::new(),
        }
    }

    /// Set the MS level
    pub fn ms_level(mut self, level: i16) -> Self {
        self.ms_level = level;
        self
    }

    /// Set the retention time in seconds
    pub fn retention_time(mut self, rt: f64) -> Self {
        self.retention_time = Some(rt);
        self
    }

    /// Add a single peak
    pub fn add_peak(mut self, mz: f64, intensity: f64) -> Self {
        self.peaks.push((mz, intensity));
        self
    }

    /// Add several peaks at once
    pub fn peaks(mut self, peaks: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.peaks.extend(peaks);
        self
    }

    /// Build the spectrum; peaks are sorted by m/z
    pub fn build(mut self) -> MemorySpectrum {
        self.peaks.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (mz_array, intensity_array): (Vec<f64>, Vec<f64>) = self.peaks.into_iter().unzip();
        MemorySpectrum {
            id: self.id,
            ms_level: self.ms_level,
            retention_time: self.retention_time,
            mz_array,
            intensity_array,
        }
    }
}

/// A spectrum source over spectra already in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    identifier: String,
    spectra: std::vec::IntoIter<MemorySpectrum>,
    served: usize,
}

impl MemorySource {
    /// Create a source from spectra in acquisition order
    pub fn new(identifier: impl Into<String>, spectra: Vec<MemorySpectrum>) -> Self {
        Self {
            identifier: identifier.into(),
            spectra: spectra.into_iter(),
            served: 0,
        }
    }

    /// Number of spectra handed out so far
    pub fn spectra_served(&self) -> usize {
        self.served
    }

    /// Number of spectra not yet read
    pub fn remaining(&self) -> usize {
        self.spectra.len()
    }
}

impl SpectrumSource for MemorySource {
    type Spectrum = MemorySpectrum;
    type Error = Infallible;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn next_spectrum(&mut self) -> Result<Option<MemorySpectrum>, Infallible> {
        let next = self.spectra.next();
        if next.is_some() {
            self.served += 1;
        }
        Ok(next)
    }
}
