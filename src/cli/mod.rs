//! Command-line interface for check-export-map.
//!
//! The CLI is a thin layer over [`crate::exports`]: it resolves the list of
//! manifest files, runs the checks one file at a time, prints the outcome of
//! each, and turns the first failure into a non-zero exit status.
//!
//! # Usage
//!
//! ```bash
//! # Check ./package.json
//! check-export-map
//!
//! # Check several packages of a monorepo
//! check-export-map packages/a/package.json packages/b/package.json
//!
//! # Report every finding instead of stopping at the first one
//! check-export-map --keep-going packages/*/package.json
//!
//! # Machine-readable output
//! check-export-map --format json
//! ```
//!
//! # Output
//!
//! ```text
//! Checking export maps...
//!  PASS  packages/a/package.json
//!  FAIL  packages/b/package.json
//!   File not found for "." ./dist/index.js
//! ```

pub mod check;


use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_MANIFEST_FILE;
use crate::exports::ValidationMode;

pub use check::{CheckCommand, OutputFormat};

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags by [`Cli::build_config`] and applied once
/// before any file is checked. Tests can construct one directly and pass it
/// to [`Cli::execute_with_config`].
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set.
    ///
    /// `None` disables logging output.
    pub log_level: Option<String>,

    /// Disable ANSI colors regardless of terminal detection.
    pub no_color: bool,

    /// Fail-fast or exhaustive checking.
    pub mode: ValidationMode,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this configuration to the process.
    ///
    /// Installs the global `tracing` subscriber (a no-op if one is already
    /// installed) and sets the color override.
    pub fn apply(&self) {
        if self.no_color {
            colored::control::set_override(false);
        }

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if let Some(level) = &self.log_level {
            EnvFilter::new(level)
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Check if the export map declared in package.json is valid.
#[derive(Parser)]
#[command(
    name = "check-export-map",
    about = "Check if the export map declared in package.json is valid.",
    disable_version_flag = true,
    long_about = "Check if the export map declared in package.json is valid.\n\n\
                  Each file is checked in order. The first failing file stops the run \
                  unless --keep-going is given."
)]
pub struct Cli {
    /// Manifest files to check. Defaults to ./package.json
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Displays current version
    #[arg(short = 'v', long)]
    version: bool,

    /// Output format: text or json
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only print failures
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    verbose: bool,

    /// Report every finding and keep checking after a failing file
    #[arg(long)]
    keep_going: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    ///
    /// `--verbose` selects `debug`, `--quiet` disables logging, and the
    /// default is `warn`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            no_color: self.no_color,
            mode: if self.keep_going {
                ValidationMode::Exhaustive
            } else {
                ValidationMode::FailFast
            },
        }
    }

    /// Execute the CLI with a specific configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        if self.version {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        config.apply();

        let files = if self.files.is_empty() {
            vec![PathBuf::from(DEFAULT_MANIFEST_FILE)]
        } else {
            self.files
        };

        CheckCommand {
            files,
            format: self.format,
            quiet: self.quiet,
            mode: config.mode,
        }
        .execute()
    }
}
