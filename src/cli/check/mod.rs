//! Batch checking of manifest files.
//!
//! [`CheckCommand`] walks the given files in order and hands every outcome to
//! a reporter. Text output streams one line per file; JSON output is printed
//! once at the end as a [`CheckResults`] document.
//!
//! # Text format
//!
//! ```text
//! Checking export maps...
//!  PASS  package.json
//! No "exports" field found in packages/legacy/package.json. Skipping...
//!  FAIL  packages/b/package.json
//!   Duplicate entry "./utils".
//! ```
//!
//! # JSON format
//!
//! ```json
//! {
//!   "valid": false,
//!   "files": [
//!     { "file": "package.json", "status": "pass", "findings": [] },
//!     {
//!       "file": "packages/b/package.json",
//!       "status": "fail",
//!       "findings": [
//!         { "kind": "structural", "entry": "./utils", "message": "Duplicate entry \"./utils\"." }
//!       ]
//!     }
//!   ]
//! }
//! ```

mod executor;
mod reporter;
mod results;


pub use executor::{CheckCommand, display_path};
pub use results::{CheckResults, FileReport};

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored PASS/FAIL lines as each file is checked.
    #[default]
    Text,

    /// A single JSON document once all files are checked.
    Json,
}
