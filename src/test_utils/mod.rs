//! Test utilities for check-export-map
//!
//! Helpers shared by unit tests and the integration tests in `tests/`:
//! - [`init_test_logging`] to see `tracing` output from a test
//! - [`PackageFixture`] to lay out a package on disk
//!
//! # Example
//!
//! ```rust,no_run
//! use check_export_map::test_utils::PackageFixture;
//! use serde_json::json;
//!
//! let fixture = PackageFixture::new()
//!     .unwrap()
//!     .with_file("index.js")
//!     .unwrap()
//!     .with_manifest(&json!({
//!         "exports": { ".": "./index.js", "./package.json": "./package.json" }
//!     }))
//!     .unwrap();
//! assert!(fixture.manifest_path().exists());
//! ```

pub mod fixtures;

pub use fixtures::PackageFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` if it is set. Does nothing
/// if neither is provided. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=check_export_map=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
