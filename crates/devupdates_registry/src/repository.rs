//! Repository identifier parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Invalid repository identifier '{0}', expected 'owner/repo'")]
    InvalidFormat(String),
}

/// A repository on the release registry, written `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    owner: String,
    repo: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self, RepositoryError> {
        let owner = owner.into();
        let repo = repo.into();
        if !is_segment(&owner) || !is_segment(&repo) {
            return Err(RepositoryError::InvalidFormat(format!("{owner}/{repo}")));
        }
        Ok(Self { owner, repo })
    }

    pub fn parse(s: &str) -> Result<Self, RepositoryError> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(RepositoryError::InvalidFormat(s.to_string()));
        }
        Self::new(parts[0].trim(), parts[1].trim())
            .map_err(|_| RepositoryError::InvalidFormat(s.to_string()))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// `{api_base}/repos/{owner}/{repo}/releases/latest`
    pub fn latest_release_endpoint(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// `{web_base}/{owner}/{repo}`
    pub fn homepage(&self, web_base: &str) -> String {
        format!("{}/{}/{}", web_base.trim_end_matches('/'), self.owner, self.repo)
    }

    /// Source archive of the `v{version}` tag.
    pub fn tag_archive_url(&self, web_base: &str, version: &str) -> String {
        format!("{}/archive/refs/tags/v{version}.zip", self.homepage(web_base))
    }
}

impl FromStr for RepositoryId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// A single non-empty path segment that is not `.` or `..`.
fn is_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && !s.contains(['/', '\\', '@', '?', '#'])
        && !s.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_owner_repo() {
        let id = RepositoryId::parse("galliweb/wp-dev-updates").unwrap();
        assert_eq!(id.owner(), "galliweb");
        assert_eq!(id.repo(), "wp-dev-updates");
        assert_eq!(id.to_string(), "galliweb/wp-dev-updates");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: RepositoryId = " owner / repo ".parse().unwrap();
        assert_eq!(id.to_string(), "owner/repo");
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_slash("owner")]
    #[case::too_many_parts("a/b/c")]
    #[case::empty_owner("/repo")]
    #[case::empty_repo("owner/")]
    #[case::dot_dot("../repo")]
    #[case::inner_space("own er/repo")]
    fn test_parse_invalid(#[case] input: &str) {
        assert_eq!(
            RepositoryId::parse(input),
            Err(RepositoryError::InvalidFormat(input.to_string()))
        );
    }

    #[test]
    fn test_urls() {
        let id = RepositoryId::parse("galliweb/wp-dev-updates").unwrap();

        assert_eq!(
            id.latest_release_endpoint("https://api.github.com"),
            "https://api.github.com/repos/galliweb/wp-dev-updates/releases/latest"
        );
        assert_eq!(
            id.homepage("https://github.com/"),
            "https://github.com/galliweb/wp-dev-updates"
        );
        assert_eq!(
            id.tag_archive_url("https://github.com", "1.1"),
            "https://github.com/galliweb/wp-dev-updates/archive/refs/tags/v1.1.zip"
        );
    }
}
