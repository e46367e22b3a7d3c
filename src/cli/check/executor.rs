//! Runs the export map checks over a list of manifest files.

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::OutputFormat;
use super::reporter::Reporter;
use super::results::CheckResults;
use crate::core::CheckError;
use crate::exports::{CheckOptions, ValidationMode, check_file};

/// A batch of manifest files to check.
#[derive(Debug, Clone)]
pub struct CheckCommand {
    /// Files in the order they are checked.
    pub files: Vec<PathBuf>,
    /// How outcomes are printed.
    pub format: OutputFormat,
    /// Only print failures.
    pub quiet: bool,
    /// In fail-fast mode the batch also stops at the first failing file.
    pub mode: ValidationMode,
}

impl CheckCommand {
    /// Check every file and print the outcomes to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ValidationFailed`] if any file failed, after its
    /// findings have been printed. Loader errors (missing file, invalid JSON)
    /// abort the batch and are returned as-is.
    pub fn execute(self) -> Result<()> {
        let stdout = std::io::stdout();
        self.execute_to(stdout.lock())
    }

    /// Same as [`execute`](Self::execute), writing to `out`.
    pub fn execute_to<W: Write>(self, out: W) -> Result<()> {
        let cwd = std::env::current_dir().ok();
        let options = CheckOptions::new(self.mode);
        let mut reporter = Reporter::new(out, self.format, self.quiet);
        let mut results = CheckResults::default();

        reporter.start()?;

        for file in &self.files {
            let shown = display_path(file, cwd.as_deref());
            tracing::debug!(file = %shown, "checking manifest");

            let outcome = match check_file(file, &options) {
                Ok(outcome) => outcome,
                Err(e) => {
                    results.abort(format!("{e:#}"));
                    reporter.finish(&results)?;
                    return Err(e);
                }
            };

            reporter.file(&shown, &outcome)?;
            let failed = outcome.is_failure();
            results.record(shown, &outcome);

            if failed && self.mode == ValidationMode::FailFast {
                break;
            }
        }

        reporter.finish(&results)?;

        if let Some(first) = results.first_failure() {
            let findings: usize = results.files.iter().map(|report| report.findings.len()).sum();
            tracing::debug!(failed = results.failed_count(), findings, "batch failed");
            return Err(CheckError::ValidationFailed {
                file: first.file.clone(),
                findings,
            }
            .into());
        }

        Ok(())
    }
}

/// Path shown to the user: relative to `cwd` when it lies below it, as given
/// otherwise.
pub fn display_path(file: &Path, cwd: Option<&Path>) -> String {
    cwd.and_then(|cwd| file.strip_prefix(cwd).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(file)
        .display()
        .to_string()
}
