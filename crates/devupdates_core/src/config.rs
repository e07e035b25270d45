//! Updater configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use devupdates_registry::RepositoryId;
use devupdates_registry::release::{DEFAULT_API_BASE, DEFAULT_WEB_BASE};

use crate::error::ConfigError;
use crate::version::parse_version;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Immutable configuration of the updater and the notification policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdaterConfig {
    /// Release repository, `owner/repo`.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Plugin folder and main file as the host knows it.
    #[serde(default = "default_plugin_basename")]
    pub plugin_basename: String,

    /// Version currently installed.
    #[serde(default = "default_current_version")]
    pub current_version: String,

    /// Display name.
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Base URL of the registry REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for homepages and archive downloads.
    #[serde(default = "default_web_base_url")]
    pub web_base_url: String,

    /// Registry request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Which update notification emails are sent, and to whom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    #[serde(default = "default_recipient")]
    pub recipient: String,

    #[serde(default)]
    pub send_on_success: bool,

    #[serde(default = "default_true")]
    pub send_on_fail: bool,

    #[serde(default = "default_true")]
    pub send_on_critical: bool,

    /// Site name used in rewritten subjects.
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

fn default_repository() -> String {
    "galliweb/wp-dev-updates".to_string()
}

fn default_plugin_basename() -> String {
    "wp-dev-updates/wp-dev-updates.php".to_string()
}

fn default_current_version() -> String {
    "1.0".to_string()
}

fn default_name() -> String {
    "Galliweb Dev Updates".to_string()
}

fn default_author() -> String {
    "Galliweb".to_string()
}

fn default_description() -> String {
    "Erweiterte Kontrolle über Update-Benachrichtigungen".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_web_base_url() -> String {
    DEFAULT_WEB_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_recipient() -> String {
    "dev@galliweb.ch".to_string()
}

fn default_site_name() -> String {
    "WordPress".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            send_on_success: false,
            send_on_fail: true,
            send_on_critical: true,
            site_name: default_site_name(),
        }
    }
}

impl UpdaterConfig {
    /// Config file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".devupdates.jsonc", ".devupdates.json"];

    /// Creates the built-in configuration.
    pub fn new() -> Self {
        Self {
            repository: default_repository(),
            plugin_basename: default_plugin_basename(),
            current_version: default_current_version(),
            name: default_name(),
            author: default_author(),
            description: default_description(),
            api_base_url: default_api_base_url(),
            web_base_url: default_web_base_url(),
            timeout_secs: default_timeout_secs(),
            notifications: NotificationConfig::default(),
        }
    }

    /// Finds the first config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.devupdates.jsonc`, `.devupdates.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON or JSONC string, with schema validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(ConfigError::Validation(e.to_string()));
        }

        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.repository_id()?;

        if parse_version(&self.current_version).is_err() {
            return Err(ConfigError::invalid(format!(
                "currentVersion '{}' is not a version",
                self.current_version
            )));
        }

        let slug = self.slug();
        if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
            return Err(ConfigError::invalid(format!(
                "pluginBasename '{}' must be 'folder/file'",
                self.plugin_basename
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeoutSecs must be positive"));
        }

        Ok(())
    }

    /// Parsed repository identifier.
    pub fn repository_id(&self) -> Result<RepositoryId, ConfigError> {
        RepositoryId::parse(&self.repository).map_err(|e| ConfigError::invalid(e.to_string()))
    }

    /// Plugin folder name, the part of the basename before the last `/`.
    pub fn slug(&self) -> &str {
        self.plugin_basename
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Starter config file contents.
    pub fn template() -> String {
        let config = Self::new();
        format!(
            r#"{{
  // Release repository (owner/repo)
  "repository": "{}",
  // Plugin folder and main file
  "pluginBasename": "{}",
  "currentVersion": "{}",
  "timeoutSecs": {},
  "notifications": {{
    "recipient": "{}",
    "sendOnSuccess": false,
    "sendOnFail": true,
    "sendOnCritical": true
  }}
}}
"#,
            config.repository,
            config.plugin_basename,
            config.current_version,
            config.timeout_secs,
            config.notifications.recipient,
        )
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_config_new() {
        let config = UpdaterConfig::new();
        assert_eq!(config.repository, "galliweb/wp-dev-updates");
        assert_eq!(config.slug(), "wp-dev-updates");
        assert_eq!(config.current_version, "1.0");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_notification_defaults() {
        let notifications = NotificationConfig::default();
        assert!(!notifications.send_on_success);
        assert!(notifications.send_on_fail);
        assert!(notifications.send_on_critical);
        assert_eq!(notifications.recipient, "dev@galliweb.ch");
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = UpdaterConfig::from_json("{}").unwrap();
        assert_eq!(config, UpdaterConfig::new());
    }

    #[test]
    fn test_config_from_jsonc() {
        let json = r#"{
            // comments are allowed
            "repository": "acme/widget",
            "pluginBasename": "widget/widget.php",
            "currentVersion": "2.4.0",
            "notifications": { "sendOnSuccess": true, "siteName": "Acme" }
        }"#;

        let config = UpdaterConfig::from_json(json).unwrap();
        assert_eq!(config.repository_id().unwrap().to_string(), "acme/widget");
        assert_eq!(config.slug(), "widget");
        assert_eq!(config.current_version, "2.4.0");
        assert!(config.notifications.send_on_success);
        assert!(config.notifications.send_on_fail);
        assert_eq!(config.notifications.site_name, "Acme");
    }

    #[test]
    fn test_template_round_trips() {
        let config = UpdaterConfig::from_json(&UpdaterConfig::template()).unwrap();
        assert_eq!(config.repository, UpdaterConfig::new().repository);
    }

    #[rstest]
    #[case::unknown_property(r#"{ "repo": "a/b" }"#, "Config validation failed")]
    #[case::type_mismatch(r#"{ "timeoutSecs": "ten" }"#, "Config validation failed")]
    #[case::bad_repository(r#"{ "repository": "nope" }"#, "Config validation failed")]
    #[case::bad_basename(r#"{ "pluginBasename": "single-file.php" }"#, "Config validation failed")]
    #[case::bad_version(r#"{ "currentVersion": "latest" }"#, "Invalid config")]
    #[case::zero_timeout(r#"{ "timeoutSecs": 0 }"#, "Config validation failed")]
    #[case::not_json(r#"{ "repository": "#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let result = UpdaterConfig::from_json(json);
        assert!(result.is_err(), "Expected error for JSON: {}", json);
        let err = result.unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(UpdaterConfig::discover(dir.path()), None);

        fs::write(dir.path().join(".devupdates.json"), "{}").unwrap();
        assert_eq!(
            UpdaterConfig::discover(dir.path()),
            Some(dir.path().join(".devupdates.json"))
        );

        fs::write(dir.path().join(".devupdates.jsonc"), "{}").unwrap();
        assert_eq!(
            UpdaterConfig::discover(dir.path()),
            Some(dir.path().join(".devupdates.jsonc"))
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".devupdates.jsonc");
        fs::write(&path, r#"{ "currentVersion": "1.2" }"#).unwrap();

        let config = UpdaterConfig::from_file(&path).unwrap();
        assert_eq!(config.current_version, "1.2");
        assert_eq!(
            config.description,
            "Erweiterte Kontrolle über Update-Benachrichtigungen"
        );
    }

    #[test]
    fn test_from_file_missing() {
        match UpdaterConfig::from_file("/nonexistent/.devupdates.jsonc") {
            Err(ConfigError::Read { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/.devupdates.jsonc"))
            }
            res => panic!("Expected Read error, got {:?}", res),
        }
    }
}
