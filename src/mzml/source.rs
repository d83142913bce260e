//! mzML files as a [`SpectrumSource`]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::error::MzMLError;
use super::reader::{MzMLReader, MzMLScan};
use crate::source::{scan_number_from_id, ScanRecord, SpectrumSource};

const INPUT_BUFFER_SIZE: usize = 64 * 1024;

impl ScanRecord for MzMLScan {
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
        &self.mzs
    }

    fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    /// Falls back to the 1-based position in the spectrum list
    fn scan_number(&self) -> Option<i64> {
        scan_number_from_id(&self.id).or(Some(self.index as i64 + 1))
    }
}

/// Streaming spectrum source over one mzML document
pub struct MzMLSource<R: BufRead> {
    identifier: String,
    reader: MzMLReader<R>,
}

impl MzMLSource<BufReader<File>> {
    /// Open an mzML file; the path becomes the source identifier
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MzMLError> {
        let path = path.as_ref();
        debug!("Opening mzML file: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(
            path.display().to_string(),
            BufReader::with_capacity(INPUT_BUFFER_SIZE, file),
        ))
    }
}

impl<R: BufRead> MzMLSource<R> {
    /// Wrap an already opened reader
    pub fn from_reader(identifier: impl Into<String>, reader: R) -> Self {
        Self {
            identifier: identifier.into(),
            reader: MzMLReader::new(reader),
        }
    }
}

impl<R: BufRead> SpectrumSource for MzMLSource<R> {
    type Spectrum = MzMLScan;
    type Error = MzMLError;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn next_spectrum(&mut self) -> Result<Option<MzMLScan>, MzMLError> {
        self.reader.next_scan()
    }
}
