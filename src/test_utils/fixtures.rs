//! On-disk package layouts for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::DEFAULT_MANIFEST_FILE;

/// A package directory in a temporary location.
///
/// The directory is removed when the fixture is dropped.
pub struct PackageFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl PackageFixture {
    /// Create an empty package directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let root = temp_dir.path().join("pkg");
        fs::create_dir_all(&root)?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Package root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of `package.json` in the package root.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(DEFAULT_MANIFEST_FILE)
    }

    /// Write `package.json` from a JSON value.
    pub fn with_manifest(self, manifest: &serde_json::Value) -> Result<Self> {
        let content = serde_json::to_string_pretty(manifest)?;
        self.with_raw_manifest(&content)
    }

    /// Write `package.json` verbatim, e.g. to include duplicate keys.
    pub fn with_raw_manifest(self, content: &str) -> Result<Self> {
        fs::write(self.manifest_path(), content)
            .with_context(|| format!("Failed to write {}", self.manifest_path().display()))?;
        Ok(self)
    }

    /// Create an empty file, and its parent folders, relative to the root.
    pub fn with_file(self, relative: &str) -> Result<Self> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, "")
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(self)
    }

    /// Create a folder relative to the root.
    pub fn with_dir(self, relative: &str) -> Result<Self> {
        fs::create_dir_all(self.root.join(relative))?;
        Ok(self)
    }
}
