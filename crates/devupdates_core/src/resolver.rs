//! Self-update resolution.
//!
//! [`UpdateResolver`] answers the host's three update questions for a single
//! plugin: is there a newer release, what are its package details, and where
//! should the freshly extracted archive live. Every failure is logged and
//! turned into a "nothing to do" answer; the host polls again on its own
//! schedule and its installer reports any error that matters to the user.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use devupdates_registry::{RegistryClient, RegistryHttpClient, ReleaseDescriptor, RepositoryId};

use crate::config::UpdaterConfig;
use crate::error::ConfigError;
use crate::hooks::{DEFAULT_PRIORITY, HookRegistry, Subscriber};
use crate::host::{HookExtra, PLUGIN_INFORMATION_ACTION, PluginInfo, UpdateEntry, UpdateTransient};
use crate::relocate::InstallRelocation;
use crate::version::{Version, is_newer, parse_version};

/// Priority of the package-details filter, after the host's defaults.
pub const PLUGINS_API_PRIORITY: i32 = 20;

/// Result of a version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCandidate {
    pub current_version: String,
    /// Latest published version, `None` when the registry was unavailable.
    pub remote_version: Option<String>,
    pub package_url: Option<String>,
    /// True iff `remote_version` strictly exceeds `current_version`.
    pub available: bool,
}

/// Resolves updates of one plugin against its release registry.
#[derive(Debug, Clone)]
pub struct UpdateResolver {
    config: UpdaterConfig,
    repository: RepositoryId,
    current_version: Version,
    client: RegistryClient,
}

impl UpdateResolver {
    /// Creates a resolver talking to the registry named in `config`.
    pub fn new(config: UpdaterConfig) -> Result<Self, ConfigError> {
        let http_client = RegistryHttpClient::builder()
            .timeout(config.timeout())
            .build();
        let client = RegistryClient::new(http_client)
            .with_api_base(config.api_base_url.clone())
            .with_web_base(config.web_base_url.clone());
        Self::with_client(config, client)
    }

    /// Creates a resolver with a preconfigured registry client.
    pub fn with_client(config: UpdaterConfig, client: RegistryClient) -> Result<Self, ConfigError> {
        config.validate()?;
        let repository = config.repository_id()?;
        let current_version = parse_version(&config.current_version)
            .map_err(|e| ConfigError::invalid(format!("currentVersion: {e}")))?;

        Ok(Self {
            config,
            repository,
            current_version,
            client,
        })
    }

    pub fn slug(&self) -> &str {
        self.config.slug()
    }

    pub fn plugin_basename(&self) -> &str {
        &self.config.plugin_basename
    }

    pub fn homepage(&self) -> String {
        self.repository.homepage(self.client.web_base())
    }

    /// Archive URL of the `v{version}` tag.
    pub fn package_url(&self, version: &str) -> String {
        self.repository.tag_archive_url(self.client.web_base(), version)
    }

    /// Latest release, or `None` when it cannot be used this cycle.
    ///
    /// Tags that do not name a version (e.g. `latest`) count as unavailable.
    pub fn fetch_latest_release(&self) -> Option<ReleaseDescriptor> {
        let release = match self.client.fetch_latest_release(&self.repository) {
            Ok(release) => release,
            Err(e) if e.is_malformed() => {
                warn!("Unusable release payload for {}: {}", self.repository, e);
                return None;
            }
            Err(e) if e.is_transport() => {
                warn!("Release registry unreachable for {}: {}", self.repository, e);
                return None;
            }
            Err(e) => {
                warn!("Release check for {} failed: {}", self.repository, e);
                return None;
            }
        };

        if let Err(e) = parse_version(&release.version) {
            warn!(
                "Ignoring release tag '{}' of {}: {}",
                release.tag, self.repository, e
            );
            return None;
        }

        debug!("Latest release of {} is {}", self.repository, release.tag);
        Some(release)
    }

    /// Compares the installed version with the latest release.
    pub fn check_for_update(&self) -> UpdateCandidate {
        let current_version = self.config.current_version.clone();

        let Some(release) = self.fetch_latest_release() else {
            return UpdateCandidate {
                current_version,
                remote_version: None,
                package_url: None,
                available: false,
            };
        };

        let available = parse_version(&release.version).is_ok_and(|remote| is_newer(&self.current_version, &remote));

        if available {
            info!(
                "Update available for {}: {} -> {}",
                self.plugin_basename(),
                current_version,
                release.version
            );
        }

        UpdateCandidate {
            current_version,
            package_url: Some(self.package_url(&release.version)),
            remote_version: Some(release.version),
            available,
        }
    }

    /// Package details for display, only for this plugin's own slug.
    pub fn describe_for_display(&self, identifier: &str) -> Option<PluginInfo> {
        if identifier != self.slug() {
            return None;
        }

        let version = self.fetch_latest_release().map(|release| release.version);
        let download_link = version.as_deref().map(|v| self.package_url(v));

        let mut sections = BTreeMap::new();
        sections.insert("description".to_string(), self.config.description.clone());

        Some(PluginInfo {
            name: self.config.name.clone(),
            slug: self.slug().to_string(),
            version,
            author: self.config.author.clone(),
            homepage: self.homepage(),
            download_link,
            sections,
        })
    }

    /// Host entry for package-details requests.
    pub fn plugin_information(&self, action: &str, identifier: &str) -> Option<PluginInfo> {
        if action != PLUGIN_INFORMATION_ACTION {
            return None;
        }
        self.describe_for_display(identifier)
    }

    /// Moves an extracted archive next to itself under the plugin's slug.
    ///
    /// Returns `extracted_path` unchanged when the install is for another
    /// plugin or when the move fails.
    pub fn relocate_extracted_source(&self, extracted_path: &Path, event: &HookExtra) -> PathBuf {
        if !event.targets(self.plugin_basename()) {
            return extracted_path.to_path_buf();
        }

        let moved = InstallRelocation::new(extracted_path, self.slug())
            .and_then(|relocation| relocation.execute());

        match moved {
            Ok(path) => {
                info!(
                    "Relocated {} to {}",
                    extracted_path.display(),
                    path.display()
                );
                path
            }
            Err(e) => {
                warn!("Relocation of {} failed: {}", extracted_path.display(), e);
                extracted_path.to_path_buf()
            }
        }
    }

    /// Adds this plugin's update entry to the host's update-check aggregate.
    ///
    /// An aggregate the host has not filled yet is returned untouched.
    pub fn check_transient(&self, mut transient: UpdateTransient) -> UpdateTransient {
        if !transient.is_checked() {
            return transient;
        }

        let candidate = self.check_for_update();
        if let (true, Some(new_version), Some(package)) = (
            candidate.available,
            candidate.remote_version,
            candidate.package_url,
        ) {
            transient.response.insert(
                self.plugin_basename().to_string(),
                UpdateEntry {
                    slug: self.slug().to_string(),
                    plugin: self.plugin_basename().to_string(),
                    new_version,
                    url: self.homepage(),
                    package,
                },
            );
        }

        transient
    }
}

impl Subscriber for UpdateResolver {
    fn subscribe(self: Arc<Self>, hooks: &mut HookRegistry) {
        let resolver = Arc::clone(&self);
        hooks.add_update_transient_filter(DEFAULT_PRIORITY, move |transient| {
            resolver.check_transient(transient)
        });

        // Requests for other packages keep whatever an earlier filter answered.
        let resolver = Arc::clone(&self);
        hooks.add_plugins_api_filter(PLUGINS_API_PRIORITY, move |result, action, request| {
            resolver
                .plugin_information(action, &request.slug)
                .or(result)
        });

        hooks.add_source_selection_filter(DEFAULT_PRIORITY, move |source, hook_extra| {
            self.relocate_extracted_source(&source, hook_extra)
        });
    }
}
