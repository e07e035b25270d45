//! Renaming an extracted archive directory to the plugin's folder name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RelocateError;

/// A pending move of an extracted archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRelocation {
    /// Where the archive's top-level folder was unpacked.
    pub extracted_path: PathBuf,
    /// `{parent of extracted_path}/{slug}`.
    pub target_path: PathBuf,
}

impl InstallRelocation {
    pub fn new(extracted_path: impl Into<PathBuf>, slug: &str) -> Result<Self, RelocateError> {
        let extracted_path = extracted_path.into();
        let parent = extraction_root(&extracted_path)
            .ok_or_else(|| RelocateError::NoParent(extracted_path.clone()))?;
        let target_path = parent.join(slug);

        Ok(Self {
            extracted_path,
            target_path,
        })
    }

    /// The archive already unpacked under the expected name.
    pub fn is_noop(&self) -> bool {
        normalize(&self.extracted_path) == normalize(&self.target_path)
    }

    /// Performs the move. Never overwrites an existing target.
    pub fn execute(&self) -> Result<PathBuf, RelocateError> {
        if self.is_noop() {
            return Ok(self.target_path.clone());
        }

        if fs::symlink_metadata(&self.extracted_path).is_err() {
            return Err(RelocateError::SourceMissing(self.extracted_path.clone()));
        }

        if fs::symlink_metadata(&self.target_path).is_ok() {
            return Err(RelocateError::TargetExists(self.target_path.clone()));
        }

        fs::rename(&self.extracted_path, &self.target_path).map_err(|source| {
            RelocateError::Move {
                from: self.extracted_path.clone(),
                to: self.target_path.clone(),
                source,
            }
        })?;

        Ok(self.target_path.clone())
    }
}

// Hosts hand over source paths with a trailing separator; `Path::parent`
// already ignores it.
fn extraction_root(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}
