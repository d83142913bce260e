use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod extract;
mod summary;
mod tic;

/// mzxic - Extracted ion chromatograms from LC-MS runs
#[derive(Parser)]
#[command(name = "mzxic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract ion chromatograms from mzML files
    ///
    /// Windows are written as `mz_start:mz_end[,time_start:time_end]` with times in
    /// seconds; a missing end means unbounded. A single m/z value is widened by
    /// the global m/z window.
    Extract(extract::ExtractArgs),

    /// Print the total ion current (sum of all MS1 intensities) of each file
    Tic {
        /// Input mzML files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Tic { files } => tic::run(files),
    }
}
