//! Diagnostics produced by the export map checks.

use serde::Serialize;
use std::fmt;

/// Category of an export map problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// Malformed keys or targets: not relative, duplicated, bad dot placement.
    Structural,
    /// A declared path does not exist on disk.
    Referential,
    /// Condition order disagrees with the manifest's reference order.
    Ordering,
    /// A required entry is missing or a fixed-value entry has the wrong value.
    Policy,
    /// Wildcard misuse in a key or its target.
    Shape,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindingKind::Structural => "structural",
            FindingKind::Referential => "referential",
            FindingKind::Ordering => "ordering",
            FindingKind::Policy => "policy",
            FindingKind::Shape => "shape",
        };
        f.write_str(name)
    }
}

/// One problem found in an export map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What kind of rule was broken.
    pub kind: FindingKind,
    /// The export map entry the finding is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    /// Human-readable description naming the offending key or value.
    pub message: String,
}

impl Finding {
    /// Create a finding attached to an entry.
    pub fn new(kind: FindingKind, entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entry: Some(entry.into()),
            message: message.into(),
        }
    }

    /// Create a finding about the export map as a whole.
    pub fn for_map(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            entry: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of checking one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Every check passed.
    Passed,
    /// The manifest has no `exports` field.
    Skipped,
    /// At least one finding. In fail-fast mode there is exactly one.
    Failed(Vec<Finding>),
}

impl FileOutcome {
    /// Build an outcome from the validator's findings.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        if findings.is_empty() {
            FileOutcome::Passed
        } else {
            FileOutcome::Failed(findings)
        }
    }

    /// Whether the file failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed(_))
    }

    /// Findings for this file; empty unless it failed.
    pub fn findings(&self) -> &[Finding] {
        match self {
            FileOutcome::Failed(findings) => findings,
            _ => &[],
        }
    }

    /// Short status label used by the reporters.
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::Passed => "pass",
            FileOutcome::Skipped => "skip",
            FileOutcome::Failed(_) => "fail",
        }
    }
}
