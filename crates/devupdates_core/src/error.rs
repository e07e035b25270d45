//! Error types for the update resolver.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON/JSONC.
    #[error("Invalid JSON: {0}")]
    Parse(String),

    /// The config does not match the schema.
    #[error("Config validation failed: {0}")]
    Validation(String),

    /// A field holds a value the updater cannot use.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid-value error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Errors raised while moving an extracted archive into place.
#[derive(Debug, Error)]
pub enum RelocateError {
    /// The extracted path has no parent directory to relocate within.
    #[error("Extracted path has no parent directory: {0}")]
    NoParent(PathBuf),

    /// The extracted source does not exist.
    #[error("Extracted source not found: {0}")]
    SourceMissing(PathBuf),

    /// Something already occupies the target path.
    #[error("Relocation target already exists: {0}")]
    TargetExists(PathBuf),

    /// The rename itself failed.
    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
