//! Error types for release registry queries.

use thiserror::Error;

/// Error type for release registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The endpoint is not an http(s) URL.
    #[error("Invalid registry endpoint: {0}")]
    InvalidEndpoint(String),

    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Network request failed (unreachable host, timeout, broken body).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The registry answered with something other than 200 OK.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    /// The response body is not valid JSON.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload has no string `tag_name` field.
    #[error("Release payload has no tag_name")]
    MissingTag,
}

impl RegistryError {
    /// Returns true for failures of the transport layer, including non-200 statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_))
    }

    /// Returns true when the registry answered but the payload was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::MissingTag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_is_transport() {
        let err = RegistryError::Status(StatusCode::NOT_FOUND);
        assert!(err.is_transport());
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_payload_errors_are_malformed() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        for err in [RegistryError::Malformed(parse_err), RegistryError::MissingTag] {
            assert!(err.is_malformed(), "{err:?}");
            assert!(!err.is_transport(), "{err:?}");
        }
    }

    #[test]
    fn test_endpoint_errors_are_neither() {
        let err = RegistryError::InvalidEndpoint("ftp://example.com".to_string());
        assert!(!err.is_transport());
        assert!(!err.is_malformed());
    }
}
