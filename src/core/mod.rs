//! Core types shared by the loader, the validator and the CLI.
//!
//! # Modules
//!
//! - `error` - [`CheckError`], [`ErrorContext`] and [`user_friendly_error`]
//! - `file_error` - file operation context for I/O failures
//!
//! Findings about an export map are not errors and live in
//! [`crate::exports`]. Only failures that prevent a file from being checked at
//! all are represented here.

pub mod error;
pub mod file_error;

pub use error::{CheckError, ErrorContext, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
