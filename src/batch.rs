//! # Batch Extraction
//!
//! Runs the same window set over several sources. Every source gets its own engine
//! run and its own result, so a corrupt file only loses its own chromatograms.
//!
//! With the `parallel` feature, files can be processed concurrently with rayon. Each
//! task owns its chromatograms; results are gathered in input order once every task
//! has finished.

#[cfg(feature = "mzml")]
use std::path::Path;

use log::{debug, error};

use crate::engine::{Extraction, ExtractionConfig, ExtractionEngine, ExtractionError};
use crate::source::SpectrumSource;
use crate::window::Window;

/// Outcome of extracting one source
#[derive(Debug)]
pub struct SourceOutcome {
    /// Source identifier (file path for mzML)
    pub source: String,
    /// Chromatograms, or the error that aborted this source
    pub result: Result<Extraction, ExtractionError>,
}

impl SourceOutcome {
    /// Whether extraction succeeded
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Extract `windows` from each source in turn
pub fn extract_sources<S, I>(
    sources: I,
    windows: &[Window],
    config: ExtractionConfig,
) -> Vec<SourceOutcome>
where
    S: SpectrumSource,
    I: IntoIterator<Item = S>,
{
    let engine = ExtractionEngine::with_config(config);
    sources
        .into_iter()
        .map(|mut source| {
            let result = engine.extract(&mut source, windows);
            outcome(source.identifier().to_string(), result)
        })
        .collect()
}

/// Open and extract each mzML file
///
/// A file that cannot be opened is reported like any other read failure.
/// `parallel` is ignored unless the crate was built with the `parallel` feature.
#[cfg(feature = "mzml")]
pub fn extract_files<P>(
    paths: &[P],
    windows: &[Window],
    config: ExtractionConfig,
    parallel: bool,
) -> Vec<SourceOutcome>
where
    P: AsRef<Path> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;

            debug!("Extracting {} files in parallel", paths.len());
            return paths
                .par_iter()
                .map(|path| extract_file(path.as_ref(), windows, config))
                .collect();
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        if parallel {
            log::warn!("Parallel extraction requested but built without the parallel feature; processing files sequentially.");
        }
    }

    paths
        .iter()
        .map(|path| extract_file(path.as_ref(), windows, config))
        .collect()
}

#[cfg(feature = "mzml")]
fn extract_file(path: &Path, windows: &[Window], config: ExtractionConfig) -> SourceOutcome {
    let identifier = path.display().to_string();
    let result = crate::mzml::MzMLSource::open(path)
        .map_err(ExtractionError::source_read)
        .and_then(|mut source| ExtractionEngine::with_config(config).extract(&mut source, windows));
    outcome(identifier, result)
}

fn outcome(source: String, result: Result<Extraction, ExtractionError>) -> SourceOutcome {
    match &result {
        Ok(extraction) => debug!("{}: {}", source, extraction.stats),
        Err(e) => error!("{}: {}", source, e),
    }
    SourceOutcome { source, result }
}
