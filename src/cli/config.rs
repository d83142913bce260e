//! TOML configuration file support for repeated extractions.
//!
//! Instead of passing the same windows on every run, users can keep them in a file:
//!
//! ```toml
//! # mzxic.toml
//! [extraction]
//! windows = ["500.0:500.2,0:300", "750.3"]
//! global_mz_window = 0.01
//! no_zeros = false
//! selection = "binary-search"
//! parallel = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mzxic::engine::MzSelection;

/// Root configuration structure for mzxic.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Extraction-specific settings.
    #[serde(default)]
    pub extraction: ExtractionSection,
}

/// Configuration for the extract command.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractionSection {
    /// Window specifications, same syntax as `--window`.
    #[serde(default)]
    pub windows: Vec<String>,

    /// Tolerance applied to single m/z windows.
    pub global_mz_window: Option<f64>,

    /// Drop centroids with zero intensity.
    pub no_zeros: Option<bool>,

    /// m/z selection method.
    pub selection: Option<MzSelection>,

    /// Process files in parallel (requires the parallel feature).
    pub parallel: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
