//! Pull reader yielding one [`MzMLScan`] per `<spectrum>` element

use std::io::BufRead;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Decoder, Reader};

use super::arrays::{ArrayRole, EncodedArray};
use super::error::MzMLError;
use super::terms;

/// The parts of an mzML spectrum that chromatogram extraction reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MzMLScan {
    /// Native spectrum id
    pub id: String,
    /// 0-based position in the spectrum list
    pub index: usize,
    /// MS level, 0 when the spectrum does not declare one
    pub ms_level: i16,
    /// Scan start time in seconds
    pub retention_time: Option<f64>,
    /// m/z values, ascending and finite
    pub mzs: Vec<f64>,
    /// Intensities parallel to `mzs`
    pub intensities: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Before `<spectrumList>`
    Header,
    /// Between spectra
    Spectra,
    /// After `</spectrumList>` or at the end of a document without one
    Done,
}

/// Streaming reader over the spectrum list of an mzML document
///
/// Everything outside `<spectrumList>` is skipped, as are precursor and product
/// descriptions inside each spectrum.
pub struct MzMLReader<R: BufRead> {
    xml: Reader<R>,
    position: Position,
    next_index: usize,
}

impl<R: BufRead> MzMLReader<R> {
    /// Wrap a buffered reader positioned at the start of the document
    pub fn new(reader: R) -> Self {
        let mut xml = Reader::from_reader(reader);
        xml.config_mut().trim_text(true);
        Self {
            xml,
            position: Position::Header,
            next_index: 0,
        }
    }

    /// Read the next spectrum, `Ok(None)` once the spectrum list is exhausted
    pub fn next_scan(&mut self) -> Result<Option<MzMLScan>, MzMLError> {
        let mut buf = Vec::new();
        while self.position != Position::Done {
            buf.clear();
            match self.xml.read_event_into(&mut buf)? {
                Event::Start(e) => match (self.position, e.local_name().as_ref()) {
                    (Position::Header, b"spectrumList") => self.position = Position::Spectra,
                    (Position::Spectra, b"spectrum") => return self.read_scan(&e).map(Some),
                    _ => {}
                },
                Event::End(e) if e.local_name().as_ref() == b"spectrumList" => {
                    self.position = Position::Done;
                }
                Event::Eof if self.position == Position::Spectra => {
                    self.position = Position::Done;
                    return Err(MzMLError::UnexpectedEof("spectrumList".to_string()));
                }
                Event::Eof => self.position = Position::Done,
                _ => {}
            }
        }
        Ok(None)
    }

    fn read_scan(&mut self, start: &BytesStart) -> Result<MzMLScan, MzMLError> {
        let decoder = self.xml.decoder();
        let index = attribute(start, b"index", decoder)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.next_index);
        let declared_len =
            attribute(start, b"defaultArrayLength", decoder)?.and_then(|v| v.parse().ok());
        self.next_index = index + 1;

        let mut scan = MzMLScan {
            id: attribute(start, b"id", decoder)?.unwrap_or_default(),
            index,
            ..Default::default()
        };

        // nesting depth inside precursorList/productList, whose cvParams are not ours
        let mut skipped = 0usize;
        let mut array: Option<EncodedArray> = None;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match self.xml.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    _ if skipped > 0 => skipped += 1,
                    b"precursorList" | b"productList" => skipped = 1,
                    b"binaryDataArray" => array = Some(EncodedArray::default()),
                    _ => {}
                },
                Event::End(e) => match e.local_name().as_ref() {
                    _ if skipped > 0 => skipped -= 1,
                    b"binaryDataArray" => {
                        if let Some(encoded) = array.take() {
                            store_array(&mut scan, &encoded, declared_len)?;
                        }
                    }
                    b"spectrum" => break,
                    _ => {}
                },
                Event::Empty(e) if skipped == 0 && e.local_name().as_ref() == b"cvParam" => {
                    let accession = attribute(&e, b"accession", decoder)?.unwrap_or_default();
                    match array.as_mut() {
                        Some(encoded) => encoded.describe(&accession),
                        None => apply_term(&mut scan, &accession, &e, decoder)?,
                    }
                }
                Event::Text(t) => {
                    if let Some(encoded) = array.as_mut() {
                        encoded.text.push_str(&t.unescape()?);
                    }
                }
                Event::Eof => {
                    return Err(MzMLError::UnexpectedEof(format!("spectrum '{}'", scan.id)));
                }
                _ => {}
            }
        }

        ensure_sorted(&mut scan)?;
        Ok(scan)
    }
}

fn attribute(
    element: &BytesStart,
    name: &[u8],
    decoder: Decoder,
) -> Result<Option<String>, MzMLError> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.decode_and_unescape_value(decoder)?.into_owned())),
        None => Ok(None),
    }
}

/// Spectrum and scan level cvParams
fn apply_term(
    scan: &mut MzMLScan,
    accession: &str,
    param: &BytesStart,
    decoder: Decoder,
) -> Result<(), MzMLError> {
    match accession {
        terms::MS_LEVEL => {
            scan.ms_level = attribute(param, b"value", decoder)?
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1);
        }
        terms::SCAN_START_TIME => {
            let unit = attribute(param, b"unitAccession", decoder)?;
            scan.retention_time = attribute(param, b"value", decoder)?
                .and_then(|v| v.trim().parse().ok())
                .map(|value| terms::seconds(value, unit.as_deref()));
        }
        _ => {}
    }
    Ok(())
}

fn store_array(
    scan: &mut MzMLScan,
    encoded: &EncodedArray,
    declared_len: Option<usize>,
) -> Result<(), MzMLError> {
    // other arrays (time, charge, ...) are never decoded
    let Some(role) = encoded.role else {
        return Ok(());
    };
    let values = encoded
        .decode(declared_len)
        .map_err(|source| MzMLError::Array {
            id: scan.id.clone(),
            array: role.to_string(),
            source,
        })?;
    match role {
        ArrayRole::Mz => scan.mzs = values,
        ArrayRole::Intensity => scan.intensities = values,
    }
    Ok(())
}

/// Reject non-finite m/z values and put the peaks in m/z order
fn ensure_sorted(scan: &mut MzMLScan) -> Result<(), MzMLError> {
    if let Some(position) = scan.mzs.iter().position(|mz| !mz.is_finite()) {
        return Err(MzMLError::NonFiniteMz {
            id: scan.id.clone(),
            position,
        });
    }

    // mismatched lengths are reported by the engine
    let sorted = scan.mzs.windows(2).all(|pair| pair[0] <= pair[1]);
    if !sorted && scan.mzs.len() == scan.intensities.len() {
        debug!("Sorting peaks of spectrum '{}' by m/z", scan.id);
        let mut peaks: Vec<(f64, f64)> = scan
            .mzs
            .iter()
            .copied()
            .zip(scan.intensities.iter().copied())
            .collect();
        peaks.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (mzs, intensities): (Vec<f64>, Vec<f64>) = peaks.into_iter().unzip();
        scan.mzs = mzs;
        scan.intensities = intensities;
    }
    Ok(())
}
