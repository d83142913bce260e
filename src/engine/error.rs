use std::error::Error;

/// Errors that abort an extraction run
///
/// Extraction is all-or-nothing per source: when any of these is returned, no
/// chromatograms are produced for that source.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The spectrum source could not be read
    #[error("Failed to read spectrum source: {0}")]
    SourceRead(#[source] Box<dyn Error + Send + Sync>),

    /// An MS1 spectrum carries no retention time
    #[error("Spectrum '{id}' has no retention time")]
    MissingRetentionTime {
        /// Native spectrum identifier
        id: String,
    },

    /// m/z and intensity arrays differ in length
    #[error("Spectrum '{id}': m/z array has {mz_len} values, intensity array has {intensity_len}")]
    ArrayLengthMismatch {
        /// Native spectrum identifier
        id: String,
        /// Length of the m/z array
        mz_len: usize,
        /// Length of the intensity array
        intensity_len: usize,
    },
}

impl ExtractionError {
    /// Wrap any source error
    pub fn source_read<E: Error + Send + Sync + 'static>(err: E) -> Self {
        ExtractionError::SourceRead(Box::new(err))
    }

    /// Whether this error came from the underlying source rather than its contents
    pub fn is_source_read(&self) -> bool {
        matches!(self, ExtractionError::SourceRead(_))
    }
}
