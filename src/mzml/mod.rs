//! # mzML Reader Module
//!
//! Streaming access to mzML files, the XML-based community standard for mass
//! spectrometry data defined by HUPO-PSI, exposed to the extraction engine as a
//! [`crate::source::SpectrumSource`].
//!
//! Spectra are decoded one at a time when the engine asks for the next one, so an
//! extraction that finishes early never reads the rest of the file. Of each spectrum
//! only the native id, MS level, scan start time and the m/z and intensity arrays
//! are kept:
//!
//! ```text
//! spectrumList
//! └── spectrum (id, index, defaultArrayLength)
//!     ├── cvParam  ms level
//!     ├── scanList/scan/cvParam  scan start time (s, min or ms)
//!     ├── precursorList, productList  (skipped)
//!     └── binaryDataArrayList
//!         └── binaryDataArray  m/z or intensity, 32/64-bit, optionally zlib
//! ```
//!
//! MS-Numpress arrays and non-finite m/z values are reported as errors. Peaks that are
//! not in m/z order are sorted.

mod arrays;
mod error;
mod reader;
mod source;
mod terms;

#[cfg(test)]
mod tests;

pub use arrays::ArrayError;
pub use error::MzMLError;
pub use reader::{MzMLReader, MzMLScan};
pub use source::MzMLSource;
