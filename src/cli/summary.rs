use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use mzxic::batch::SourceOutcome;

/// Per-file result line of an extract run
struct FileLine {
    source: String,
    status: FileStatus,
}

enum FileStatus {
    Ok {
        windows: usize,
        empty_windows: usize,
        centroids: usize,
        spectra_read: usize,
        early_exit_at: Option<f64>,
    },
    Failed(String),
}

/// Terminal summary printed after extraction
pub struct ExtractionSummary {
    lines: Vec<FileLine>,
}

impl ExtractionSummary {
    pub fn from_outcomes(outcomes: &[SourceOutcome]) -> Self {
        let lines = outcomes
            .iter()
            .map(|outcome| {
                let status = match &outcome.result {
                    Ok(extraction) => FileStatus::Ok {
                        windows: extraction.chromatograms.len(),
                        empty_windows: extraction.empty_chromatograms().count(),
                        centroids: extraction.stats.centroids_extracted,
                        spectra_read: extraction.stats.spectra_read,
                        early_exit_at: extraction.stats.early_exit_at,
                    },
                    Err(e) => FileStatus::Failed(e.to_string()),
                };
                FileLine {
                    source: outcome.source.clone(),
                    status,
                }
            })
            .collect();
        Self { lines }
    }

    pub fn failure_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line.status, FileStatus::Failed(_)))
            .count()
    }

    /// Format the summary with colors (requires console feature)
    #[cfg(feature = "colorized_output")]
    pub fn format_colored(&self) -> String {
        use console::Emoji;

        static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
        static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
        static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

        let mut output = String::new();
        output.push_str(&format!("{}\n", style("Extraction Summary").bold().cyan()));
        output.push_str(&format!("{}\n", style("==================").cyan()));

        for line in &self.lines {
            match &line.status {
                FileStatus::Ok {
                    windows,
                    empty_windows,
                    ..
                } => {
                    let symbol = if *empty_windows > 0 { WARN } else { OK };
                    output.push_str(&format!(
                        "[{}] {}: {}\n",
                        symbol,
                        style(&line.source).green(),
                        line.status
                    ));
                    if *empty_windows > 0 {
                        output.push_str(&format!(
                            "    {}: {} of {} windows matched nothing\n",
                            style("WARNING").yellow().bold(),
                            empty_windows,
                            windows
                        ));
                    }
                }
                FileStatus::Failed(msg) => {
                    output.push_str(&format!(
                        "[{}] {} - {}: {}\n",
                        FAIL,
                        style(&line.source).red(),
                        style("FAILED").red().bold(),
                        msg
                    ));
                }
            }
        }

        let failures = self.failure_count();
        output.push('\n');
        output.push_str(&format!(
            "{}: {} succeeded, {} failed",
            style("Summary").bold(),
            style(self.lines.len() - failures).green(),
            style(failures).red()
        ));
        output
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Ok {
                windows,
                centroids,
                spectra_read,
                early_exit_at,
                ..
            } => {
                write!(
                    f,
                    "{} windows, {} centroids, {} spectra read",
                    windows, centroids, spectra_read
                )?;
                if let Some(rt) = early_exit_at {
                    write!(f, " (stopped at rt {}s)", rt)?;
                }
                Ok(())
            }
            FileStatus::Failed(msg) => write!(f, "FAILED: {}", msg),
        }
    }
}

impl fmt::Display for ExtractionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Extraction Summary")?;
        writeln!(f, "==================")?;

        for line in &self.lines {
            writeln!(f, "{}: {}", line.source, line.status)?;
            if let FileStatus::Ok {
                windows,
                empty_windows,
                ..
            } = &line.status
            {
                if *empty_windows > 0 {
                    writeln!(
                        f,
                        "    WARNING: {} of {} windows matched nothing",
                        empty_windows, windows
                    )?;
                }
            }
        }

        let failures = self.failure_count();
        writeln!(f)?;
        write!(
            f,
            "Summary: {} succeeded, {} failed",
            self.lines.len() - failures,
            failures
        )
    }
}
