use anyhow::{bail, Result};
use log::error;
use std::path::PathBuf;

use mzxic::engine::ExtractionError;
use mzxic::mzml::MzMLSource;
use mzxic::tic::total_ion_current;

/// Print `<file>: <tic>` for each file
pub fn run(files: Vec<PathBuf>) -> Result<()> {
    let mut failures = 0usize;

    for file in &files {
        let result = MzMLSource::open(file)
            .map_err(ExtractionError::source_read)
            .and_then(|mut source| total_ion_current(&mut source));

        match result {
            Ok(tic) => println!("{}: {}", file.display(), tic),
            Err(e) => {
                error!("{}: {}", file.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} files failed", failures, files.len());
    }
    Ok(())
}
