//! Aggregated results of a batch run, used for JSON output.

use serde::Serialize;

use crate::exports::{FileOutcome, Finding};

/// Outcome of one file in the batch.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path as displayed to the user.
    pub file: String,
    /// `pass`, `skip` or `fail`.
    pub status: &'static str,
    /// Findings for a failed file; empty otherwise.
    pub findings: Vec<Finding>,
}

/// Results of a batch run.
///
/// `valid` stays true until a file fails or a manifest cannot be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResults {
    /// No file failed.
    pub valid: bool,
    /// One report per checked file, in order.
    pub files: Vec<FileReport>,
    /// Fatal error that aborted the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for CheckResults {
    fn default() -> Self {
        Self {
            valid: true,
            files: Vec::new(),
            error: None,
        }
    }
}

impl CheckResults {
    /// Record the outcome of one file.
    pub fn record(&mut self, file: impl Into<String>, outcome: &FileOutcome) {
        if outcome.is_failure() {
            self.valid = false;
        }
        self.files.push(FileReport {
            file: file.into(),
            status: outcome.label(),
            findings: outcome.findings().to_vec(),
        });
    }

    /// Record a fatal error.
    pub fn abort(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.error = Some(message.into());
    }

    /// The first file that failed, if any.
    pub fn first_failure(&self) -> Option<&FileReport> {
        self.files.iter().find(|report| !report.findings.is_empty())
    }

    /// Number of files that failed.
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|report| !report.findings.is_empty()).count()
    }
}
