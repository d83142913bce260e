//! # Report Writers
//!
//! Serializes extracted chromatograms for downstream use:
//!
//! - **Quantitation CSV**: one row per (source, window) with the total ion count
//! - **Trace TSV**: ion chromatogram and m/z view arrays, four tab-joined lines per
//!   chromatogram, readable by spreadsheet and plotting tools
//! - **Trace JSON**: the same traces as structured records for external plotters

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::engine::ExtractedChromatogram;
use crate::view::{ColoredMzView, IonChromatogram};
use crate::window::Window;

/// Errors raised while writing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of the quantitation CSV
///
/// An unbounded `time_end` is written as `inf`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantRow {
    /// Source identifier
    pub source: String,
    /// Lower m/z bound
    pub mz_start: f64,
    /// Upper m/z bound
    pub mz_end: f64,
    /// Lower time bound (seconds)
    pub time_start: f64,
    /// Upper time bound (seconds)
    pub time_end: f64,
    /// Summed intensity of all centroids
    pub ion_count: f64,
}

impl From<&ExtractedChromatogram> for QuantRow {
    fn from(chromatogram: &ExtractedChromatogram) -> Self {
        Self {
            source: chromatogram.source().to_string(),
            mz_start: chromatogram.mz_start(),
            mz_end: chromatogram.mz_end(),
            time_start: chromatogram.time_start(),
            time_end: chromatogram.time_end().as_f64(),
            ion_count: chromatogram.ion_count(),
        }
    }
}

/// Write the quantitation table, one row per chromatogram
pub fn write_quant_csv<'a, W, I>(writer: W, chromatograms: I) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ExtractedChromatogram>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for chromatogram in chromatograms {
        csv_writer.serialize(QuantRow::from(chromatogram))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write ion chromatogram and m/z view arrays as tab separated lines
///
/// Each chromatogram contributes five lines: a `<file name>:<window>` header, then
/// ion chromatogram times, summed intensities, m/z view times and m/z values.
pub fn write_trace_tsv<'a, W, I>(mut writer: W, chromatograms: I) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ExtractedChromatogram>,
{
    for chromatogram in chromatograms {
        let ion = chromatogram.ion_chromatogram();
        let view = chromatogram.mz_view();

        writeln!(
            writer,
            "{}:{}",
            display_name(chromatogram.source()),
            chromatogram.window()
        )?;
        writeln!(writer, "{}", join_tab(&ion.times))?;
        writeln!(writer, "{}", join_tab(&ion.intensities))?;
        writeln!(writer, "{}", join_tab(&view.times))?;
        writeln!(writer, "{}", join_tab(&view.mzs))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct TraceRecord<'a> {
    source: &'a str,
    window: &'a Window,
    ion_count: f64,
    ion_chromatogram: IonChromatogram,
    mz_view: ColoredMzView,
}

/// Write traces as a JSON array, one object per chromatogram
///
/// Point colors in the m/z view are intensities, or `log(intensity)` in
/// `color_log_base` when given.
pub fn write_trace_json<'a, W, I>(
    writer: W,
    chromatograms: I,
    color_log_base: Option<f64>,
) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ExtractedChromatogram>,
{
    let records: Vec<TraceRecord<'_>> = chromatograms
        .into_iter()
        .map(|chromatogram| TraceRecord {
            source: chromatogram.source(),
            window: chromatogram.window(),
            ion_count: chromatogram.ion_count(),
            ion_chromatogram: chromatogram.ion_chromatogram(),
            mz_view: chromatogram.mz_view_with_colors(color_log_base),
        })
        .collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

fn display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

fn join_tab(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\t")
}
