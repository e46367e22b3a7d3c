//! Export map validation engine.
//!
//! Given a parsed [`Manifest`] and the directory it lives in, this module
//! applies a fixed rule set to the `exports` field and produces an ordered list
//! of [`Finding`]s. An empty list means the export map is valid.
//!
//! # Rules
//!
//! Entries are visited in declaration order:
//!
//! 1. Keys are unique and start with `.`
//! 2. `./package.json` maps to `"./package.json"`; `./`, when present, maps to `"./"`
//! 3. Path targets are relative and exist on disk
//! 4. Wildcard keys end in `*`, their targets contain `*`, and the folder in
//!    front of the target's `*` exists
//! 5. Condition names do not start with `.`
//! 6. `import` targets end in `.mjs` unless the package is `"type": "module"`
//! 7. Conditions appear in the same relative order as in the conditional
//!    target with the most conditions (the reference order)
//!
//! After all entries, `.` and then `./package.json` must have been seen.
//!
//! # Fail-fast
//!
//! By default the first finding ends the check of a file, so at most one
//! finding is returned. [`ValidationMode::Exhaustive`] collects all of them.
//!
//! # Example
//!
//! ```rust,no_run
//! use check_export_map::exports::{CheckOptions, FileOutcome, check_manifest};
//! use check_export_map::manifest::Manifest;
//! use std::path::Path;
//!
//! let manifest = Manifest::load(Path::new("package.json"))?;
//! match check_manifest(&manifest, &CheckOptions::default()) {
//!     FileOutcome::Passed => println!("ok"),
//!     FileOutcome::Skipped => println!("no exports"),
//!     FileOutcome::Failed(findings) => eprintln!("{}", findings[0]),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

mod finding;
mod order;
mod targets;
mod validator;

#[cfg(test)]
mod validator_tests;

pub use finding::{FileOutcome, Finding, FindingKind};
pub use order::{ReferenceOrder, format_order};
pub use targets::{validate_value, wildcard_folder};
pub use validator::{CheckOptions, ValidationMode, validate, validate_with};

use anyhow::Result;
use std::path::Path;

use crate::manifest::Manifest;

/// Check a loaded manifest against its own directory.
///
/// Returns [`FileOutcome::Skipped`] when there is no `exports` field.
pub fn check_manifest(manifest: &Manifest, options: &CheckOptions) -> FileOutcome {
    if !manifest.has_exports() {
        return FileOutcome::Skipped;
    }
    FileOutcome::from_findings(validate_with(manifest, manifest.base_dir(), options))
}

/// Load the manifest at `path` and check it.
///
/// # Errors
///
/// Fails only if the manifest cannot be loaded; see [`Manifest::load`].
pub fn check_file(path: &Path, options: &CheckOptions) -> Result<FileOutcome> {
    let manifest = Manifest::load(path)?;
    Ok(check_manifest(&manifest, options))
}
