use anyhow::{bail, Context, Result};
use clap::Args;
use log::{info, warn};
use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use mzxic::batch::{extract_files, SourceOutcome};
use mzxic::engine::{ExtractedChromatogram, ExtractionConfig, MzSelection};
use mzxic::report::{write_quant_csv, write_trace_json, write_trace_tsv};
use mzxic::window::Window;

use super::config::Config;
use super::summary::ExtractionSummary;

/// Arguments of the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input mzML files
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Window to extract, `mz_start:mz_end[,time_start:time_end]` or a single m/z
    #[arg(short = 'w', long = "window", value_name = "SPEC")]
    pub windows: Vec<String>,

    /// Tolerance (+/-) applied to windows given as a single m/z
    #[arg(short = 'g', long, value_name = "MZ")]
    pub global_mz_window: Option<f64>,

    /// Write total ion counts per file and window to this CSV file
    #[arg(short = 'q', long, value_name = "CSV")]
    pub quantfile: Option<PathBuf>,

    /// Write ion chromatogram and m/z view traces to this TSV file
    #[arg(long, value_name = "FILE")]
    pub tsv: Option<PathBuf>,

    /// Write traces as JSON for external plotting
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Color m/z view points by log(intensity) in this base (JSON output)
    #[arg(long, value_name = "BASE")]
    pub color_log: Option<f64>,

    /// Ignore centroids with zero intensity
    #[arg(long)]
    pub no_zeros: bool,

    /// Test every m/z point instead of bisecting the sorted array
    #[arg(long)]
    pub linear: bool,

    /// Process files in parallel (requires the parallel feature)
    #[arg(long)]
    pub parallel: bool,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Extract chromatograms from every file and write the requested reports
pub fn run(args: ExtractArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let settings = &config.extraction;

    let global_mz_window = args.global_mz_window.or(settings.global_mz_window);
    let windows = parse_windows(
        settings.windows.iter().chain(args.windows.iter()),
        global_mz_window,
    )?;
    if windows.is_empty() {
        bail!("No windows given; pass --window or list windows in the config file");
    }

    if args.quantfile.is_none() && args.tsv.is_none() && args.json.is_none() {
        bail!("No output requested; pass --quantfile, --tsv or --json");
    }

    if let Some(base) = args.color_log {
        if base <= 0.0 || base == 1.0 {
            bail!("--color-log base must be positive and not 1, got {}", base);
        }
    }

    let selection = if args.linear {
        MzSelection::Linear
    } else {
        settings.selection.unwrap_or_default()
    };
    let extraction_config = ExtractionConfig::default()
        .with_selection(selection)
        .with_skip_zero_intensity(args.no_zeros || settings.no_zeros.unwrap_or(false));
    let parallel = args.parallel || settings.parallel.unwrap_or(false);

    info!("Files: {}", args.files.len());
    for window in &windows {
        info!("Window: {}", window);
    }
    info!("Selection: {}", selection);

    let outcomes = extract_files(&args.files, &windows, extraction_config, parallel);
    report_empty_windows(&outcomes);

    let chromatograms: Vec<&ExtractedChromatogram> = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .flat_map(|extraction| extraction.chromatograms.iter())
        .collect();

    if let Some(path) = &args.quantfile {
        let path = with_default_extension(path, "csv");
        let file = create(&path)?;
        write_quant_csv(file, chromatograms.iter().copied())
            .with_context(|| format!("Failed to write quantfile: {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if let Some(path) = &args.tsv {
        let path = with_default_extension(path, "tsv");
        let file = create(&path)?;
        write_trace_tsv(file, chromatograms.iter().copied())
            .with_context(|| format!("Failed to write traces: {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if let Some(path) = &args.json {
        let path = with_default_extension(path, "json");
        let file = create(&path)?;
        write_trace_json(file, chromatograms.iter().copied(), args.color_log)
            .with_context(|| format!("Failed to write traces: {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    let summary = ExtractionSummary::from_outcomes(&outcomes);
    #[cfg(feature = "colorized_output")]
    {
        println!("{}", summary.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", summary);
    }

    if summary.failure_count() > 0 {
        bail!(
            "{} of {} files failed",
            summary.failure_count(),
            outcomes.len()
        );
    }

    Ok(())
}

fn parse_windows<'a>(
    specs: impl Iterator<Item = &'a String>,
    global_mz_window: Option<f64>,
) -> Result<Vec<Window>> {
    specs
        .map(|spec| {
            Window::parse(spec, global_mz_window)
                .with_context(|| format!("Invalid window: {}", spec))
        })
        .collect()
}

fn report_empty_windows(outcomes: &[SourceOutcome]) {
    for outcome in outcomes {
        if let Ok(extraction) = &outcome.result {
            for chromatogram in extraction.empty_chromatograms() {
                warn!(
                    "{}: no centroids matched window {}",
                    outcome.source,
                    chromatogram.window()
                );
            }
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Append `.ext` unless the path already ends with it
fn with_default_extension(path: &Path, ext: &str) -> PathBuf {
    let has_ext = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false);
    if has_ext {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
