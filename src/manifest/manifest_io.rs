//! I/O operations for manifest files.
//!
//! Loading is the only place where a manifest can fail hard: a missing file,
//! an unreadable file, or invalid JSON all abort the batch. Everything after a
//! successful load is reported as findings.

use crate::core::CheckError;
use crate::core::file_error::FileOps;
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

impl Manifest {
    /// Load and parse a manifest from a JSON file.
    ///
    /// The directory containing `path` is recorded in
    /// [`manifest_dir`](Manifest::manifest_dir) so export targets can be
    /// resolved against it. A bare file name such as `package.json` resolves
    /// against the current directory.
    ///
    /// # Errors
    ///
    /// - [`CheckError::ManifestNotFound`] if `path` does not exist
    /// - [`CheckError::PermissionDenied`] / [`CheckError::FileSystemError`] if
    ///   it cannot be read
    /// - [`CheckError::ManifestParseError`] if it is not a JSON object
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use check_export_map::manifest::Manifest;
    /// use std::path::Path;
    ///
    /// let manifest = Manifest::load(Path::new("package.json"))?;
    /// if !manifest.has_exports() {
    ///     println!("nothing to check");
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = FileOps::metadata_with_context(path, "locating manifest", "manifest_io")
            .map_err(CheckError::from)?;
        if metadata.is_dir() {
            return Err(CheckError::FileSystemError {
                operation: "reading manifest (path is a directory)".to_string(),
                path: path.display().to_string(),
            }
            .into());
        }

        let content = FileOps::read_with_context(path, "reading package manifest", "manifest_io")
            .map_err(CheckError::from)?;

        let mut manifest = Self::from_json_str(&content, &path.display().to_string())
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

        manifest.manifest_dir = Some(manifest_dir_of(path));

        tracing::debug!(
            manifest = %path.display(),
            name = manifest.name.as_deref().unwrap_or("<unnamed>"),
            version = manifest.version.as_deref().unwrap_or("<none>"),
            has_exports = manifest.has_exports(),
            is_module = manifest.is_module(),
            "loaded manifest"
        );

        Ok(manifest)
    }

    /// Parse a manifest from JSON text.
    ///
    /// `file` only labels errors. The returned manifest has no
    /// [`manifest_dir`](Manifest::manifest_dir).
    pub fn from_json_str(content: &str, file: &str) -> Result<Self, CheckError> {
        serde_json::from_str(content).map_err(|e| CheckError::ManifestParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })
    }

    /// Directory export targets are resolved against.
    ///
    /// Falls back to `.` for manifests that were not loaded from disk.
    pub fn base_dir(&self) -> &Path {
        self.manifest_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

fn manifest_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
