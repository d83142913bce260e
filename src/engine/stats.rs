use std::fmt;

/// Statistics from a completed extraction run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionStats {
    /// Spectra pulled from the source (all MS levels)
    pub spectra_read: usize,
    /// MS1 spectra considered for matching
    pub ms1_spectra: usize,
    /// Centroids appended across all windows
    pub centroids_extracted: usize,
    /// Retention time at which every window had finished, if that happened
    pub early_exit_at: Option<f64>,
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read {} spectra ({} MS1), extracted {} centroids",
            self.spectra_read, self.ms1_spectra, self.centroids_extracted
        )?;
        if let Some(rt) = self.early_exit_at {
            write!(f, ", stopped early at {} s", rt)?;
        }
        Ok(())
    }
}
