//! Self-update resolver and update-notification policy.
//!
//! [`UpdateResolver`] checks a release registry for newer versions of a
//! plugin, describes the package to the host, and renames extracted update
//! archives. [`NotificationPolicy`] filters and rewrites the host's
//! automatic-update emails. Both plug into the host through [`HookRegistry`].

pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod notifications;
pub mod relocate;
pub mod resolver;
pub mod version;

pub use config::{NotificationConfig, UpdaterConfig};
pub use error::{ConfigError, RelocateError};
pub use hooks::{DEFAULT_PRIORITY, ExtensionPoint, HookRegistry, Subscriber};
pub use host::{
    HookExtra, PLUGIN_INFORMATION_ACTION, PluginInfo, PluginInfoRequest, UpdateEntry,
    UpdateTransient,
};
pub use notifications::{NotificationKind, NotificationPolicy, UpdateEmail};
pub use relocate::InstallRelocation;
pub use resolver::{UpdateCandidate, UpdateResolver};
pub use version::{Version, VersionError, is_newer, parse_version};

pub use devupdates_registry::{RegistryClient, RegistryError, ReleaseDescriptor, RepositoryId};
