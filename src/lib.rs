//! Check that the export map declared in a package.json is valid.
//!
//! The `exports` field of a package manifest maps public subpaths (`.`,
//! `./utils`, `./features/*`) to files inside the package, optionally split by
//! condition (`import`, `require`, `default`, ...). This crate loads a manifest,
//! applies a fixed rule set to its export map, and reports every violation as a
//! [`Finding`](exports::Finding).
//!
//! # Architecture
//!
//! - [`manifest`] - package.json loading, with an order-preserving export map
//! - [`exports`] - the validation engine: entry rules, target resolution,
//!   wildcard folders, condition ordering
//! - [`cli`] - argument parsing, batch runs, text and JSON reporting
//! - [`core`] - error types and user-facing error formatting
//! - [`constants`] - fixed entry names and extensions
//!
//! # Example
//!
//! ```rust,no_run
//! use check_export_map::exports::{CheckOptions, ValidationMode, check_file};
//! use std::path::Path;
//!
//! let options = CheckOptions::new(ValidationMode::Exhaustive);
//! let outcome = check_file(Path::new("package.json"), &options)?;
//! for finding in outcome.findings() {
//!     println!("{}: {}", finding.kind, finding.message);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Command line
//!
//! ```bash
//! check-export-map                      # ./package.json
//! check-export-map a/package.json b/package.json
//! check-export-map --keep-going --format json packages/*/package.json
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod exports;
pub mod manifest;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
