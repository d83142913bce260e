use quick_xml::events::attributes::AttrError;

use super::arrays::ArrayError;

/// Errors that can occur while reading an mzML document
#[derive(Debug, thiserror::Error)]
pub enum MzMLError {
    /// Malformed XML, or an I/O failure underneath the XML reader
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute
    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    /// The file could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A binary array of a spectrum could not be decoded
    #[error("cannot decode {array} array of spectrum '{id}': {source}")]
    Array {
        /// Native id of the spectrum
        id: String,
        /// `m/z` or `intensity`
        array: String,
        /// Decode failure
        #[source]
        source: ArrayError,
    },

    /// A decoded m/z value is NaN or infinite
    #[error("spectrum '{id}' has a non-finite m/z value at position {position}")]
    NonFiniteMz {
        /// Native id of the spectrum
        id: String,
        /// Index into the m/z array
        position: usize,
    },

    /// The document ends before the element named here is closed
    #[error("unexpected end of document inside {0}")]
    UnexpectedEof(String),
}
