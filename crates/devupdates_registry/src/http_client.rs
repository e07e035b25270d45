//! Blocking HTTP client for registry requests.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::error::RegistryError;

/// Default timeout for registry requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Media type for the GitHub REST v3 JSON format.
pub const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

/// Default User-Agent. GitHub rejects API requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("devupdates/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the release registry.
///
/// The underlying `reqwest` client is built per request, so this type is
/// plain configuration and can be created and cloned anywhere.
#[derive(Debug, Clone)]
pub struct RegistryHttpClient {
    timeout: Duration,
    user_agent: String,
    accept: String,
}

/// Builder for [`RegistryHttpClient`].
#[derive(Debug)]
pub struct RegistryHttpClientBuilder {
    timeout: Duration,
    user_agent: String,
    accept: String,
}

impl Default for RegistryHttpClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RegistryHttpClient {
    /// Create a new builder for RegistryHttpClient.
    pub fn builder() -> RegistryHttpClientBuilder {
        RegistryHttpClientBuilder {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: GITHUB_V3_ACCEPT.to_string(),
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and parse the body as JSON.
    ///
    /// Anything but `200 OK` is an error. No retries.
    pub fn get_json(&self, url: &str) -> Result<serde_json::Value, RegistryError> {
        let url = validate_endpoint(url)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| RegistryError::ClientBuild(e.to_string()))?;

        debug!("GET {}", url);
        let response = client
            .get(url)
            .header(ACCEPT, self.accept.as_str())
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RegistryError::Status(status));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl RegistryHttpClientBuilder {
    /// Set timeout for HTTP requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    /// Build the RegistryHttpClient.
    pub fn build(self) -> RegistryHttpClient {
        RegistryHttpClient {
            timeout: self.timeout,
            user_agent: self.user_agent,
            accept: self.accept,
        }
    }
}

fn validate_endpoint(url_str: &str) -> Result<Url, RegistryError> {
    let url = Url::parse(url_str)
        .map_err(|e| RegistryError::InvalidEndpoint(format!("{url_str}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RegistryError::InvalidEndpoint(format!(
            "{url_str}: unsupported scheme '{scheme}'"
        ))),
    }
}
