//! Text and JSON rendering of check outcomes.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use super::OutputFormat;
use super::results::CheckResults;
use crate::exports::FileOutcome;

/// Writes outcomes to `out` in the selected format.
///
/// Text output is streamed per file. JSON output is written only by
/// [`Reporter::finish`].
pub(crate) struct Reporter<W> {
    out: W,
    format: OutputFormat,
    quiet: bool,
}

impl<W: Write> Reporter<W> {
    pub(crate) fn new(out: W, format: OutputFormat, quiet: bool) -> Self {
        Self {
            out,
            format,
            quiet,
        }
    }

    fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    pub(crate) fn start(&mut self) -> Result<()> {
        if self.is_text() && !self.quiet {
            writeln!(self.out, "Checking export maps...")?;
        }
        Ok(())
    }

    pub(crate) fn file(&mut self, display: &str, outcome: &FileOutcome) -> Result<()> {
        if !self.is_text() {
            return Ok(());
        }

        match outcome {
            FileOutcome::Passed => {
                if !self.quiet {
                    writeln!(self.out, "{} {display}", " PASS ".green().reversed())?;
                }
            }
            FileOutcome::Skipped => {
                if !self.quiet {
                    writeln!(self.out, "No \"exports\" field found in {display}. Skipping...")?;
                }
            }
            FileOutcome::Failed(findings) => {
                writeln!(self.out, "{} {display}", " FAIL ".red().reversed())?;
                for finding in findings {
                    writeln!(self.out, "  {}", finding.message.red())?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self, results: &CheckResults) -> Result<()> {
        if !self.is_text() {
            writeln!(self.out, "{}", serde_json::to_string_pretty(results)?)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
