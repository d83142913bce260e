//! # mzxic - Extracted Ion Chromatograms from LC-MS Runs
//!
//! `mzxic` pulls extracted ion chromatograms (XICs) out of liquid chromatography mass
//! spectrometry runs. Given a set of (m/z, retention time) windows, it reads the run
//! once, in acquisition order, and collects every MS1 centroid that falls inside each
//! window.
//!
//! ## Key Features
//!
//! - **Single Pass**: Any number of windows are filled in one sequential read of the
//!   run.
//!
//! - **Early Exit**: Retention time never decreases within a run, so once every
//!   window's time range has passed, reading stops. Extracting an early eluting ion
//!   from a long run touches only the start of the file.
//!
//! - **Streaming mzML**: The bundled mzML reader decodes one spectrum at a time
//!   (32/64-bit, zlib or uncompressed arrays).
//!
//! - **Derived Views**: Ion chromatograms, (time, m/z) scatter views and ion counts
//!   are computed on demand from the extracted centroids.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzxic::prelude::*;
//!
//! let spectra = vec![
//!     SpectrumBuilder::new("scan=101").retention_time(1.0).add_peak(500.0, 500.0).build(),
//!     SpectrumBuilder::new("scan=102")
//!         .retention_time(2.0)
//!         .add_peak(500.1, 1000.0)
//!         .add_peak(500.2, 500.0)
//!         .build(),
//! ];
//! let mut source = MemorySource::new("run1", spectra);
//!
//! let window: Window = "500.0:500.25,1.5:3.5".parse()?;
//! let extraction = extract(&mut source, &[window])?;
//!
//! let xic = &extraction.chromatograms[0];
//! assert_eq!(xic.len(), 2);
//! assert_eq!(xic.ion_count(), 1500.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reading mzML Files
//!
//! ```rust,no_run
//! use mzxic::prelude::*;
//!
//! let windows = vec![Window::parse("750.3", Some(0.01))?];
//! let mut source = MzMLSource::open("run1.mzML")?;
//! let extraction = ExtractionEngine::new().extract(&mut source, &windows)?;
//! println!("{}", extraction.stats);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`window`]: m/z and time windows and their textual form
//! - [`centroid`]: a single extracted (scan, time, m/z, intensity) point
//! - [`source`]: the spectrum source abstraction and an in-memory source
//! - [`engine`]: the single-pass extraction engine
//! - [`view`]: chromatogram views derived from extracted centroids
//! - [`batch`]: running one window set over many sources
//! - [`report`]: quantitation CSV, trace TSV and trace JSON writers
//! - [`tic`]: total ion current of a run
//! - `mzml`: streaming mzML reader (requires the `mzml` feature)

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod centroid;
pub mod engine;
#[cfg(feature = "mzml")]
pub mod mzml;
pub mod report;
pub mod source;
pub mod tic;
pub mod view;
pub mod window;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::batch::{extract_sources, SourceOutcome};
    #[cfg(feature = "mzml")]
    pub use crate::batch::extract_files;
    pub use crate::centroid::Centroid;
    pub use crate::engine::{
        extract, ExtractedChromatogram, Extraction, ExtractionConfig, ExtractionEngine,
        ExtractionError, ExtractionStats, MzSelection,
    };
    #[cfg(feature = "mzml")]
    pub use crate::mzml::{MzMLError, MzMLSource};
    pub use crate::report::{
        write_quant_csv, write_trace_json, write_trace_tsv, QuantRow, ReportError,
    };
    pub use crate::source::{
        MemorySource, MemorySpectrum, ScanRecord, SpectrumBuilder, SpectrumSource,
    };
    pub use crate::tic::total_ion_current;
    pub use crate::view::{ColoredMzView, IonChromatogram, MzView};
    pub use crate::window::{TimeBound, Window, WindowError};
}
