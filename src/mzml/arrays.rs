//! Decoding of `<binaryDataArray>` payloads
//!
//! An array's cvParams are folded into an [`EncodedArray`] as they stream past, the
//! Base64 text is appended, and the whole thing is decoded once the element closes.

use std::fmt;
use std::io::Read;

use base64::prelude::*;
use byteorder::{ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;

use super::terms;

/// Which spectrum array a `<binaryDataArray>` carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ArrayRole {
    Mz,
    Intensity,
}

impl fmt::Display for ArrayRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayRole::Mz => write!(f, "m/z"),
            ArrayRole::Intensity => write!(f, "intensity"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Precision {
    F32,
    #[default]
    F64,
}

impl Precision {
    fn width(self) -> usize {
        match self {
            Precision::F32 => 4,
            Precision::F64 => 8,
        }
    }
}

/// Errors decoding a single binary array
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// Text is not valid Base64
    #[error("invalid Base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// zlib stream is corrupt
    #[error("zlib: {0}")]
    Zlib(#[from] std::io::Error),

    /// Compression the reader does not implement (MS-Numpress)
    #[error("unsupported compression {0}")]
    Unsupported(String),

    /// Byte count is not a multiple of the value width
    #[error("{bytes} bytes do not hold whole {width}-byte values")]
    PartialValue {
        /// Decoded byte count
        bytes: usize,
        /// Bytes per value
        width: usize,
    },

    /// Value count differs from the spectrum's `defaultArrayLength`
    #[error("declared {declared} values, decoded {decoded}")]
    LengthMismatch {
        /// `defaultArrayLength`
        declared: usize,
        /// Values actually present
        decoded: usize,
    },
}

/// A binary array collected from the document, not yet decoded
#[derive(Debug, Default)]
pub(super) struct EncodedArray {
    pub(super) role: Option<ArrayRole>,
    precision: Precision,
    zlib: bool,
    unsupported: Option<String>,
    pub(super) text: String,
}

impl EncodedArray {
    /// Fold one cvParam accession into the array description
    pub(super) fn describe(&mut self, accession: &str) {
        match accession {
            terms::MZ_ARRAY => self.role = Some(ArrayRole::Mz),
            terms::INTENSITY_ARRAY => self.role = Some(ArrayRole::Intensity),
            terms::FLOAT_32 => self.precision = Precision::F32,
            terms::FLOAT_64 => self.precision = Precision::F64,
            terms::ZLIB => self.zlib = true,
            other if terms::NUMPRESS.contains(&other) => {
                self.unsupported = Some(other.to_string());
            }
            _ => {}
        }
    }

    /// Decode to `f64` values, checking the count against `declared` when known
    pub(super) fn decode(&self, declared: Option<usize>) -> Result<Vec<f64>, ArrayError> {
        if let Some(accession) = &self.unsupported {
            return Err(ArrayError::Unsupported(accession.clone()));
        }

        let raw = BASE64_STANDARD.decode(self.text.trim())?;
        let bytes = if self.zlib {
            let mut inflated = Vec::with_capacity(raw.len() * 4);
            ZlibDecoder::new(raw.as_slice()).read_to_end(&mut inflated)?;
            inflated
        } else {
            raw
        };

        let width = self.precision.width();
        if bytes.len() % width != 0 {
            return Err(ArrayError::PartialValue {
                bytes: bytes.len(),
                width,
            });
        }

        let values: Vec<f64> = match self.precision {
            Precision::F32 => bytes
                .chunks_exact(4)
                .map(|chunk| f64::from(LittleEndian::read_f32(chunk)))
                .collect(),
            Precision::F64 => bytes.chunks_exact(8).map(LittleEndian::read_f64).collect(),
        };

        match declared {
            Some(declared) if declared != values.len() => Err(ArrayError::LengthMismatch {
                declared,
                decoded: values.len(),
            }),
            _ => Ok(values),
        }
    }
}
