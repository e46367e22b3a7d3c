//! Error handling for check-export-map
//!
//! Two layers of failure exist in this crate and they are reported differently:
//! 1. **Findings** ([`crate::exports::Finding`]) are problems in a manifest's
//!    export map. They are data, produced by the validator and printed by the
//!    reporter.
//! 2. **Errors** ([`CheckError`]) are everything that stops the tool from
//!    checking a file at all: a missing manifest, invalid JSON, unreadable files.
//!    They abort the whole batch.
//!
//! [`ErrorContext`] wraps a [`CheckError`] with a suggestion and details for
//! terminal display, and [`user_friendly_error`] turns any [`anyhow::Error`]
//! into one.
//!
//! # Examples
//!
//! ```rust,no_run
//! use check_export_map::core::{CheckError, ErrorContext};
//!
//! let context = ErrorContext::new(CheckError::ManifestNotFound {
//!     path: "package.json".to_string(),
//! })
//! .with_suggestion("Pass the path to a package.json file");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::core::file_error::FileOperationError;

/// The main error type for check-export-map operations
///
/// # Error Categories
///
/// ## Loading
/// - [`ManifestNotFound`] - the manifest path does not exist
/// - [`ManifestParseError`] - the manifest is not valid JSON
/// - [`FileSystemError`] / [`PermissionDenied`] - the manifest could not be read
///
/// ## Checking
/// - [`ValidationFailed`] - a file produced findings; the reporter has already
///   printed them
///
/// [`ManifestNotFound`]: CheckError::ManifestNotFound
/// [`ManifestParseError`]: CheckError::ManifestParseError
/// [`FileSystemError`]: CheckError::FileSystemError
/// [`PermissionDenied`]: CheckError::PermissionDenied
/// [`ValidationFailed`]: CheckError::ValidationFailed
#[derive(Error, Debug, Clone)]
pub enum CheckError {
    /// Manifest file not found
    #[error("Manifest file not found: {path}")]
    ManifestNotFound {
        /// Path that was given for the manifest
        path: String,
    },

    /// Manifest parsing error
    #[error("Invalid manifest file syntax in {file}: {reason}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// One or more files in the batch failed their export map checks
    #[error("Export map check failed for {file} ({findings} finding(s))")]
    ValidationFailed {
        /// Display path of the first failing file
        file: String,
        /// Number of findings reported for the batch
        findings: usize,
    },

    /// Generic error for cases not covered above
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

impl From<FileOperationError> for CheckError {
    fn from(error: FileOperationError) -> Self {
        let path = error.file_path.display().to_string();
        match error.source.kind() {
            std::io::ErrorKind::NotFound => Self::ManifestNotFound {
                path,
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: format!("{} {}", error.operation, error.purpose),
                path,
            },
            _ => Self::FileSystemError {
                operation: error.user_message(),
                path,
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Details are shown in yellow and suggestions in green beneath the red error
/// line.
///
/// ```rust,no_run
/// use check_export_map::core::{CheckError, ErrorContext};
///
/// let context = ErrorContext::new(CheckError::ManifestParseError {
///     file: "package.json".to_string(),
///     reason: "expected value at line 1 column 1".to_string(),
/// })
/// .with_details("The manifest must be a JSON object");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CheckError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub const fn new(error: CheckError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises [`CheckError`], [`FileOperationError`], [`std::io::Error`] and
/// [`serde_json::Error`]. Anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(check_error) = error.downcast_ref::<CheckError>() {
        return create_error_context(check_error.clone());
    }

    if let Some(file_error) = error.downcast_ref::<FileOperationError>() {
        let details = file_error.user_message();
        return create_error_context(CheckError::from(FileOperationError {
            operation: file_error.operation,
            file_path: file_error.file_path.clone(),
            purpose: file_error.purpose.clone(),
            caller: file_error.caller.clone(),
            source: std::io::Error::new(file_error.source.kind(), file_error.source.to_string()),
        }))
        .with_details(details);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CheckError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions")
                .with_details("The manifest could not be read with the current permissions");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CheckError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(json_error) = error.downcast_ref::<serde_json::Error>() {
        return ErrorContext::new(CheckError::ManifestParseError {
            file: "package.json".to_string(),
            reason: json_error.to_string(),
        })
        .with_suggestion("Check the JSON syntax of the manifest. Look for trailing commas and unquoted keys");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CheckError::Other {
        message,
    })
}

fn create_error_context(error: CheckError) -> ErrorContext {
    match &error {
        CheckError::ManifestNotFound {
            path,
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check that '{path}' exists, or run the command from the package root"
            ))
            .with_details("When no files are given, package.json in the current directory is checked"),

        CheckError::ManifestParseError {
            file,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Check the JSON syntax in {file}. Common issues: trailing commas, single quotes, comments"
            )),

        CheckError::PermissionDenied {
            path,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(match cfg!(windows) {
                true => "Check file permissions in File Explorer",
                false => "Check file permissions with 'ls -la'",
            })
            .with_details(format!("Insufficient permissions on {path}")),

        _ => ErrorContext::new(error.clone()),
    }
}
