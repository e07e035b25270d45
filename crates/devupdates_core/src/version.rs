//! Release version parsing and ordering.
//!
//! Versions are [`semver::Version`]s. Release tags often carry only one or
//! two numeric components (`1.0`), so missing minor and patch components are
//! padded with zeros before parsing and `1.0` equals `1.0.0`. Build metadata
//! is dropped and takes no part in ordering.

use std::borrow::Cow;

use semver::BuildMetadata;
pub use semver::Version;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid version '{input}': {source}")]
pub struct VersionError {
    input: String,
    #[source]
    source: semver::Error,
}

impl VersionError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses a release version such as `1.0`, `2.3.1` or `2.0-beta.1`.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    let mut version =
        Version::parse(&pad_components(input)).map_err(|source| VersionError {
            input: input.to_string(),
            source,
        })?;
    version.build = BuildMetadata::EMPTY;
    Ok(version)
}

/// Returns true when `remote` strictly exceeds `current`.
pub fn is_newer(current: &Version, remote: &Version) -> bool {
    current < remote
}

// `1` -> `1.0.0`, `1.2-rc.1` -> `1.2.0-rc.1`. Anything else is left for
// semver to accept or reject.
fn pad_components(input: &str) -> Cow<'_, str> {
    let (core, rest) = input.split_at(input.find(['-', '+']).unwrap_or(input.len()));
    let missing = 2usize.saturating_sub(core.matches('.').count());
    if core.is_empty() || missing == 0 {
        return Cow::Borrowed(input);
    }
    Cow::Owned(format!("{core}{}{rest}", ".0".repeat(missing)))
}
