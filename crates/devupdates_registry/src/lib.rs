//! Release registry client for devupdates.
//!
//! Queries a GitHub-style REST API for the latest tagged release of a
//! repository and turns the payload into a [`ReleaseDescriptor`].

pub mod error;
pub mod http_client;
pub mod release;
pub mod repository;

pub use error::RegistryError;
pub use http_client::{DEFAULT_TIMEOUT, RegistryHttpClient};
pub use release::{RegistryClient, ReleaseDescriptor, strip_tag_prefix};
pub use repository::{RepositoryError, RepositoryId};
