//! # Extraction Engine
//!
//! Builds one extracted ion chromatogram per window in a single sequential pass over
//! a spectrum source.
//!
//! ## Algorithm
//!
//! ```text
//! searching = all windows
//! for spectrum in source (acquisition order):
//!     skip unless ms level == 1
//!     for window in searching:
//!         rt inside window time range  -> append matching (m/z, intensity) points
//!         rt past window upper bound   -> window is finished, drop it
//!         otherwise                    -> not reached yet, keep waiting
//!     stop reading once searching is empty
//! ```
//!
//! Retention time is assumed to be non-decreasing across the source, so a finished
//! window can never match again and stopping early never changes the result. Windows
//! with an unbounded upper time never finish and keep the pass going to the end of
//! the source.

mod chromatogram;
mod config;
mod error;
mod stats;

#[cfg(test)]
mod tests;

use log::{debug, info, trace};

pub use chromatogram::ExtractedChromatogram;
pub use config::{ExtractionConfig, MzSelection};
pub use error::ExtractionError;
pub use stats::ExtractionStats;

use crate::centroid::Centroid;
use crate::source::{ScanRecord, SpectrumSource};
use crate::window::Window;

/// Result of one extraction run over one source
#[derive(Debug, Clone)]
pub struct Extraction {
    /// One chromatogram per input window, in the same order as the windows
    pub chromatograms: Vec<ExtractedChromatogram>,
    /// Run statistics
    pub stats: ExtractionStats,
}

impl Extraction {
    /// The chromatogram extracted for `window`, if it was one of the inputs
    pub fn chromatogram_for(&self, window: &Window) -> Option<&ExtractedChromatogram> {
        self.chromatograms.iter().find(|c| c.window() == window)
    }

    /// Chromatograms that matched nothing
    pub fn empty_chromatograms(&self) -> impl Iterator<Item = &ExtractedChromatogram> {
        self.chromatograms.iter().filter(|c| c.is_empty())
    }
}

/// Single-pass multi-window extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionEngine {
    config: ExtractionConfig,
}

impl ExtractionEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// The engine configuration
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract one chromatogram per window from `source`
    ///
    /// Reads the source at most once, stopping as soon as every window has finished.
    /// Any read failure aborts the run without partial results.
    pub fn extract<S: SpectrumSource>(
        &self,
        source: &mut S,
        windows: &[Window],
    ) -> Result<Extraction, ExtractionError> {
        let identifier = source.identifier().to_string();
        let mut chromatograms: Vec<ExtractedChromatogram> = windows
            .iter()
            .map(|w| ExtractedChromatogram::empty(identifier.clone(), *w))
            .collect();
        let mut searching: Vec<usize> = (0..windows.len()).collect();
        let mut stats = ExtractionStats::default();

        if searching.is_empty() {
            debug!("{}: no windows to extract", identifier);
            return Ok(Extraction {
                chromatograms,
                stats,
            });
        }

        while let Some(spectrum) = source
            .next_spectrum()
            .map_err(ExtractionError::source_read)?
        {
            stats.spectra_read += 1;
            if spectrum.ms_level() != 1 {
                continue;
            }
            stats.ms1_spectra += 1;

            let rt = spectrum
                .retention_time()
                .ok_or_else(|| ExtractionError::MissingRetentionTime {
                    id: spectrum.id().to_string(),
                })?;
            let mzs = spectrum.mzs();
            let intensities = spectrum.intensities();
            if mzs.len() != intensities.len() {
                return Err(ExtractionError::ArrayLengthMismatch {
                    id: spectrum.id().to_string(),
                    mz_len: mzs.len(),
                    intensity_len: intensities.len(),
                });
            }

            let scan_number = spectrum.scan_number().unwrap_or_else(|| {
                let ordinal = stats.spectra_read as i64;
                debug!(
                    "no scan number in id '{}', using position {}",
                    spectrum.id(),
                    ordinal
                );
                ordinal
            });

            let config = &self.config;
            let mut matched = 0;
            searching.retain(|&index| {
                let window = &windows[index];
                if window.contains_time(rt) {
                    let chromatogram = &mut chromatograms[index];
                    for i in config.selection.select(mzs, window.mz()) {
                        let intensity = intensities[i];
                        if config.skip_zero_intensity && intensity <= 0.0 {
                            continue;
                        }
                        chromatogram.push(Centroid::new(scan_number, rt, mzs[i], intensity));
                        matched += 1;
                    }
                    true
                } else if window.is_finished_at(rt) {
                    debug!("window {} finished at rt(s): {}", window, rt);
                    false
                } else {
                    true
                }
            });

            if matched > 0 {
                trace!("scan {} at {} s: {} centroids", scan_number, rt, matched);
            }
            stats.centroids_extracted += matched;

            if searching.is_empty() {
                info!("{}: no more windows to match at rt(s): {}", identifier, rt);
                stats.early_exit_at = Some(rt);
                break;
            }
        }

        debug!("{}: {}", identifier, stats);
        Ok(Extraction {
            chromatograms,
            stats,
        })
    }
}

/// Extract with the default configuration
pub fn extract<S: SpectrumSource>(
    source: &mut S,
    windows: &[Window],
) -> Result<Extraction, ExtractionError> {
    ExtractionEngine::new().extract(source, windows)
}
