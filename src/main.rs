//! check-export-map CLI entry point
//!
//! Parses arguments, runs the checks, and maps the outcome to the exit
//! status: 0 when every file passed or was skipped, 1 otherwise.

use anyhow::Result;
use check_export_map::cli;
use check_export_map::core::{CheckError, user_friendly_error};
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Findings were already printed by the reporter
            if matches!(e.downcast_ref::<CheckError>(), Some(CheckError::ValidationFailed { .. })) {
                std::process::exit(1);
            }

            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
