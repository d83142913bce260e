use std::io::Cursor;

use base64::prelude::*;

use super::*;
use crate::engine::extract;
use crate::source::{ScanRecord, SpectrumSource};
use crate::window::Window;

fn f64_array(values: &[f64]) -> String {
    BASE64_STANDARD.encode(values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<u8>>())
}

fn f32_array(values: &[f32]) -> String {
    BASE64_STANDARD.encode(values.iter().flat_map(|v| v.to_le_bytes()).collect::<Vec<u8>>())
}

/// One spectrum with 64-bit m/z and 32-bit intensities; `extra` goes before the arrays
fn spectrum(index: usize, id: &str, extra: &str, mzs: &[f64], intensities: &[f32]) -> String {
    format!(
        r#"
      <spectrum index="{index}" id="{id}" defaultArrayLength="{len}">
        {extra}
        <binaryDataArrayList count="2">
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float"/>
            <cvParam cvRef="MS" accession="MS:1000576" name="no compression"/>
            <cvParam cvRef="MS" accession="MS:1000514" name="m/z array"/>
            <binary>{mz}</binary>
          </binaryDataArray>
          <binaryDataArray>
            <cvParam cvRef="MS" accession="MS:1000521" name="32-bit float"/>
            <cvParam cvRef="MS" accession="MS:1000576" name="no compression"/>
            <cvParam cvRef="MS" accession="MS:1000515" name="intensity array"/>
            <binary>{intensity}</binary>
          </binaryDataArray>
        </binaryDataArrayList>
      </spectrum>"#,
        len = mzs.len(),
        mz = f64_array(mzs),
        intensity = f32_array(intensities),
    )
}

fn survey(ms_level: u8, rt: &str, unit: &str) -> String {
    format!(
        r#"<cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="{ms_level}"/>
        <cvParam cvRef="MS" accession="MS:1000130" name="positive scan"/>
        <scanList count="1">
          <scan>
            <cvParam cvRef="MS" accession="MS:1000016" name="scan start time" value="{rt}" unitCvRef="UO" unitAccession="{unit}"/>
          </scan>
        </scanList>"#
    )
}

fn document(spectra: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<mzML xmlns="http://psi.hupo.org/ms/mzml" version="1.1.0">
  <cvList count="1"><cv id="MS" fullName="PSI-MS"/></cvList>
  <run id="test_run">
    <spectrumList count="{}">{}
    </spectrumList>
  </run>
</mzML>"#,
        spectra.len(),
        spectra.concat()
    )
}

/// An MS1 scan at 60 s and an MS2 scan at 1.5 min with a precursor section
fn two_scans() -> String {
    let precursor = r#"<precursorList count="1">
          <precursor spectrumRef="scan=1">
            <selectedIonList count="1"><selectedIon>
              <cvParam cvRef="MS" accession="MS:1000744" name="selected ion m/z" value="100.0"/>
            </selectedIon></selectedIonList>
            <activation>
              <cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="7"/>
              <cvParam cvRef="MS" accession="MS:1000016" name="scan start time" value="999"/>
            </activation>
          </precursor>
        </precursorList>"#;
    document(&[
        spectrum(
            0,
            "scan=1",
            &survey(1, "60.0", "UO:0000010"),
            &[100.0, 200.0],
            &[10.0, 20.5],
        ),
        spectrum(
            1,
            "scan=2",
            &format!("{}\n{}", survey(2, "1.5", "UO:0000031"), precursor),
            &[],
            &[],
        ),
    ])
}

fn reader(xml: &str) -> MzMLReader<Cursor<Vec<u8>>> {
    MzMLReader::new(Cursor::new(xml.as_bytes().to_vec()))
}

#[test]
fn test_reads_scans_in_order() {
    let mut reader = reader(&two_scans());

    let ms1 = reader.next_scan().unwrap().unwrap();
    assert_eq!(ms1.id, "scan=1");
    assert_eq!(ms1.index, 0);
    assert_eq!(ms1.ms_level, 1);
    assert_eq!(ms1.retention_time, Some(60.0));
    assert_eq!(ms1.mzs, vec![100.0, 200.0]);
    assert_eq!(ms1.intensities, vec![10.0, 20.5]);

    let ms2 = reader.next_scan().unwrap().unwrap();
    assert_eq!(ms2.index, 1);
    assert_eq!(ms2.ms_level, 2);
    // minutes converted, precursor cvParams ignored
    assert_eq!(ms2.retention_time, Some(90.0));
    assert!(ms2.mzs.is_empty());
    assert!(ms2.intensities.is_empty());
}

#[test]
fn test_end_of_spectrum_list_stays_none() {
    let mut reader = reader(&two_scans());
    assert!(reader.next_scan().unwrap().is_some());
    assert!(reader.next_scan().unwrap().is_some());
    assert!(reader.next_scan().unwrap().is_none());
    assert!(reader.next_scan().unwrap().is_none());
}

#[test]
fn test_document_without_spectrum_list() {
    let xml = r#"<?xml version="1.0"?><mzML version="1.1.0"><run id="r"></run></mzML>"#;
    assert!(reader(xml).next_scan().unwrap().is_none());
}

#[test]
fn test_millisecond_scan_time() {
    let xml = document(&[spectrum(
        0,
        "scan=1",
        &survey(1, "2500", "UO:0000028"),
        &[100.0],
        &[1.0],
    )]);
    let scan = reader(&xml).next_scan().unwrap().unwrap();
    assert_eq!(scan.retention_time, Some(2.5));
}

#[test]
fn test_missing_scan_time() {
    let xml = document(&[spectrum(
        0,
        "scan=1",
        r#"<cvParam cvRef="MS" accession="MS:1000511" name="ms level" value="1"/>"#,
        &[100.0],
        &[1.0],
    )]);
    let scan = reader(&xml).next_scan().unwrap().unwrap();
    assert_eq!(scan.ms_level, 1);
    assert_eq!(scan.retention_time, None);
}

#[test]
fn test_numpress_is_rejected() {
    let xml = two_scans().replacen(
        r#"accession="MS:1000576" name="no compression""#,
        r#"accession="MS:1002312" name="MS-Numpress linear prediction compression""#,
        1,
    );
    let err = reader(&xml).next_scan().unwrap_err();

    assert!(matches!(
        err,
        MzMLError::Array { ref id, ref array, source: ArrayError::Unsupported(_) }
            if id == "scan=1" && array == "m/z"
    ));
}

#[test]
fn test_declared_length_disagrees() {
    let xml = two_scans().replacen(r#"defaultArrayLength="2""#, r#"defaultArrayLength="3""#, 1);
    let err = reader(&xml).next_scan().unwrap_err();

    assert!(matches!(
        err,
        MzMLError::Array {
            source: ArrayError::LengthMismatch {
                declared: 3,
                decoded: 2
            },
            ..
        }
    ));
}

#[test]
fn test_truncated_inside_spectrum() {
    let xml = two_scans();
    let cut = xml.find("<binaryDataArrayList").unwrap();
    let err = reader(&xml[..cut]).next_scan().unwrap_err();

    assert!(matches!(err, MzMLError::UnexpectedEof(ref context) if context == "spectrum 'scan=1'"));
}

#[test]
fn test_truncated_between_spectra() {
    let xml = two_scans();
    let cut = xml.rfind("<spectrum ").unwrap();
    let mut reader = reader(&xml[..cut]);

    assert!(reader.next_scan().unwrap().is_some());
    assert!(matches!(
        reader.next_scan(),
        Err(MzMLError::UnexpectedEof(_))
    ));
}

#[test]
fn test_non_finite_mz_is_rejected() {
    let xml = document(&[spectrum(
        0,
        "scan=7",
        &survey(1, "1.0", "UO:0000010"),
        &[100.0, f64::NAN, 300.0],
        &[1.0, 2.0, 3.0],
    )]);
    let err = reader(&xml).next_scan().unwrap_err();

    assert!(matches!(
        err,
        MzMLError::NonFiniteMz { ref id, position: 1 } if id == "scan=7"
    ));
}

#[test]
fn test_non_finite_mz_fails_extraction() {
    let xml = document(&[spectrum(
        0,
        "scan=1",
        &survey(1, "1.0", "UO:0000010"),
        &[100.0, f64::NAN, 300.0],
        &[1.0, 2.0, 3.0],
    )]);
    let mut source = MzMLSource::from_reader("nan.mzML", Cursor::new(xml.into_bytes()));
    let window = Window::mz_only(250.0, 350.0).unwrap();

    let err = extract(&mut source, &[window]).unwrap_err();
    assert!(err.is_source_read());
}

#[test]
fn test_unsorted_peaks_are_sorted_by_mz() {
    let xml = document(&[spectrum(
        0,
        "scan=1",
        &survey(1, "1.0", "UO:0000010"),
        &[300.0, 100.0, 200.0],
        &[3.0, 1.0, 2.0],
    )]);
    let scan = reader(&xml).next_scan().unwrap().unwrap();

    assert_eq!(scan.mzs, vec![100.0, 200.0, 300.0]);
    assert_eq!(scan.intensities, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_source_exposes_scan_records() {
    let xml = document(&[spectrum(
        4,
        "index=4",
        &survey(1, "12.5", "UO:0000010"),
        &[100.0],
        &[100.0],
    )]);
    let mut source = MzMLSource::from_reader("memory.mzML", Cursor::new(xml.into_bytes()));
    assert_eq!(source.identifier(), "memory.mzML");

    let scan = source.next_spectrum().unwrap().unwrap();
    assert_eq!(ScanRecord::ms_level(&scan), 1);
    assert_eq!(ScanRecord::retention_time(&scan), Some(12.5));
    assert_eq!(scan.mzs(), &[100.0]);
    assert_eq!(scan.intensities(), &[100.0]);
    // no scan= in the id, falls back to index + 1
    assert_eq!(scan.scan_number(), Some(5));

    assert!(source.next_spectrum().unwrap().is_none());
}

#[test]
fn test_scan_number_from_native_id() {
    let scan = MzMLScan {
        id: "controllerType=0 controllerNumber=1 scan=12345".to_string(),
        index: 3,
        ..Default::default()
    };
    assert_eq!(scan.scan_number(), Some(12345));
}

#[test]
fn test_open_missing_file() {
    let err = MzMLSource::open("/nonexistent/run.mzML").err().unwrap();
    assert!(matches!(err, MzMLError::Io(_)));
}
