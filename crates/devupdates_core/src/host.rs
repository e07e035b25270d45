//! Data exchanged with the host at its extension points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Action name of a package-details request.
pub const PLUGIN_INFORMATION_ACTION: &str = "plugin_information";

/// The host's cached update-check aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Plugin basename to installed version, for every plugin the host checked.
    #[serde(default)]
    pub checked: BTreeMap<String, String>,
    /// Plugin basename to available update.
    #[serde(default)]
    pub response: BTreeMap<String, UpdateEntry>,
}

impl UpdateTransient {
    pub fn is_checked(&self) -> bool {
        !self.checked.is_empty()
    }
}

/// An available update, as the host expects it in the transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub slug: String,
    pub plugin: String,
    pub new_version: String,
    pub url: String,
    pub package: String,
}

/// A package-details request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfoRequest {
    pub slug: String,
}

/// Full package metadata for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub slug: String,
    /// Latest version, `None` when the registry could not be reached.
    pub version: Option<String>,
    pub author: String,
    pub homepage: String,
    pub download_link: Option<String>,
    pub sections: BTreeMap<String, String>,
}

/// Metadata about the install or upgrade currently in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookExtra {
    /// Basename of the plugin being installed, if the operation targets a plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
}

impl HookExtra {
    pub fn for_plugin(plugin: impl Into<String>) -> Self {
        Self {
            plugin: Some(plugin.into()),
        }
    }

    /// True when this operation installs `basename`.
    pub fn targets(&self, basename: &str) -> bool {
        self.plugin.as_deref() == Some(basename)
    }
}
