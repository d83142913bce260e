//! # mzxic
//!
//! A command-line tool for extracting ion chromatograms from mass spectrometry runs.
//!
//! ## Usage
//!
//! ```bash
//! # Quantify two ions over a time range and write quant.csv
//! mzxic extract -w 500.0:500.25,60:120 -w 750.3 -g 0.01 -q quant run1.mzML run2.mzML
//!
//! # Export ion chromatogram and m/z view traces
//! mzxic extract -w 500.0:500.25 --tsv traces --json traces run1.mzML
//!
//! # Total ion current per file
//! mzxic tic run1.mzML run2.mzML
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
