//! Latest-release lookup.

use serde_json::Value;

use crate::error::RegistryError;
use crate::http_client::RegistryHttpClient;
use crate::repository::RepositoryId;

/// Default base URL of the registry REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default base URL of the registry web frontend (homepages, archives).
pub const DEFAULT_WEB_BASE: &str = "https://github.com";

/// Metadata of the latest published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    /// Raw tag name, e.g. `v1.2.0`.
    pub tag: String,
    /// Tag with a single leading `v` removed.
    pub version: String,
    /// Source archive of the tag.
    pub download_url: String,
}

/// Strips exactly one leading `v` from a release tag.
pub fn strip_tag_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Client for the release registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http_client: RegistryHttpClient,
    api_base: String,
    web_base: String,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new(RegistryHttpClient::default())
    }
}

impl RegistryClient {
    pub fn new(http_client: RegistryHttpClient) -> Self {
        Self {
            http_client,
            api_base: DEFAULT_API_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
        }
    }

    /// Set the API base URL (for testing or GitHub Enterprise).
    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Set the web base URL used for homepages and archive links.
    pub fn with_web_base(mut self, url: impl Into<String>) -> Self {
        self.web_base = url.into();
        self
    }

    pub fn web_base(&self) -> &str {
        &self.web_base
    }

    /// Endpoint listing the latest release of `repo`.
    pub fn latest_release_endpoint(&self, repo: &RepositoryId) -> String {
        repo.latest_release_endpoint(&self.api_base)
    }

    /// Fetch the latest release of `repo`.
    pub fn fetch_latest_release(
        &self,
        repo: &RepositoryId,
    ) -> Result<ReleaseDescriptor, RegistryError> {
        let endpoint = self.latest_release_endpoint(repo);
        let payload = self.http_client.get_json(&endpoint)?;
        let tag = parse_tag(&payload)?;
        let version = strip_tag_prefix(&tag).to_string();
        let download_url = repo.tag_archive_url(&self.web_base, &version);

        Ok(ReleaseDescriptor {
            tag,
            version,
            download_url,
        })
    }
}

fn parse_tag(payload: &Value) -> Result<String, RegistryError> {
    payload
        .get("tag_name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RegistryError::MissingTag)
}
