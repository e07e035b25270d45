//! Integration tests for CLI commands

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command for the devupdates CLI
fn devupdates_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_devupdates"))
}

/// Writes a config whose registry is unreachable (nothing listens on port 9).
fn write_offline_config(dir: &Path) {
    fs::write(
        dir.join(".devupdates.jsonc"),
        r#"{
            "apiBaseUrl": "http://127.0.0.1:9",
            "timeoutSecs": 1
        }"#,
    )
    .unwrap();
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        devupdates_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        devupdates_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn creates_new_config_file() {
        let temp_dir = TempDir::new().unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .success()
            .stderr(predicate::str::contains("Created .devupdates.jsonc"));

        let content = fs::read_to_string(temp_dir.path().join(".devupdates.jsonc")).unwrap();
        assert!(content.contains("\"repository\": \"galliweb/wp-dev-updates\""));
        assert!(content.contains("notifications"));
    }

    #[test]
    fn fails_when_config_exists_without_force() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".devupdates.jsonc"), "{}").unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn overwrites_config_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".devupdates.jsonc");
        fs::write(&config_path, r#"{"currentVersion": "0.1"}"#).unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .arg("--force")
            .assert()
            .success();

        let content = fs::read_to_string(config_path).unwrap();
        assert!(!content.contains("0.1"));
        assert!(content.contains("currentVersion"));
    }
}

mod check_command {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn registry_with_tag(tag: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/galliweb/wp-dev-updates/releases/latest"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": tag })),
            )
            .mount(&server)
            .await;
        server
    }

    fn write_config(dir: &Path, api_base: &str, current_version: &str) {
        let config = serde_json::json!({
            "apiBaseUrl": api_base,
            "currentVersion": current_version,
        });
        fs::write(dir.join(".devupdates.json"), config.to_string()).unwrap();
    }

    #[test]
    fn unreachable_registry_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        write_offline_config(temp_dir.path());

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["check", "--exit-code"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No release information available"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn reports_available_update() {
        let server = registry_with_tag("v1.1").await;
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), &server.uri(), "1.0");

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("Update available: 1.0 -> 1.1"))
            .stdout(predicate::str::contains(
                "https://github.com/galliweb/wp-dev-updates/archive/refs/tags/v1.1.zip",
            ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn exit_code_signals_available_update() {
        let server = registry_with_tag("v1.1").await;
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), &server.uri(), "1.0");

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["check", "--exit-code"])
            .assert()
            .code(1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn json_output_when_up_to_date() {
        let server = registry_with_tag("v1.0").await;
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), &server.uri(), "1.0");

        let output = devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["check", "--json", "--exit-code"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let candidate: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(candidate["available"], false);
        assert_eq!(candidate["current_version"], "1.0");
        assert_eq!(candidate["remote_version"], "1.0");
    }

    #[test]
    fn invalid_config_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".devupdates.jsonc"),
            r#"{ "repository": "not-a-repo" }"#,
        )
        .unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("check")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }
}

mod info_command {
    use super::*;

    #[test]
    fn ignores_other_slugs() {
        let temp_dir = TempDir::new().unwrap();
        write_offline_config(temp_dir.path());

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["info", "akismet"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Not answering"));
    }

    #[test]
    fn describes_own_slug_without_registry() {
        let temp_dir = TempDir::new().unwrap();
        write_offline_config(temp_dir.path());

        let output = devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["info", "wp-dev-updates"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let info: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(info["slug"], "wp-dev-updates");
        assert_eq!(info["name"], "Galliweb Dev Updates");
        assert!(info["version"].is_null());
        assert_eq!(info["homepage"], "https://github.com/galliweb/wp-dev-updates");
    }
}

mod relocate_command {
    use super::*;

    #[test]
    fn renames_extracted_archive() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("random-archive-name");
        fs::create_dir(&extracted).unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("relocate")
            .arg(&extracted)
            .assert()
            .success()
            .stdout(predicate::str::contains("wp-dev-updates"));

        assert!(temp_dir.path().join("wp-dev-updates").is_dir());
        assert!(!extracted.exists());
    }

    #[test]
    fn leaves_other_plugins_alone() {
        let temp_dir = TempDir::new().unwrap();
        let extracted = temp_dir.path().join("akismet-5.3");
        fs::create_dir(&extracted).unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .arg("relocate")
            .arg(&extracted)
            .args(["--plugin", "akismet/akismet.php"])
            .assert()
            .success()
            .stdout(predicate::str::contains("akismet-5.3"));

        assert!(extracted.is_dir());
        assert!(!temp_dir.path().join("wp-dev-updates").exists());
    }
}

mod notify_command {
    use super::*;

    #[test]
    fn suppresses_success_emails() {
        let temp_dir = TempDir::new().unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["notify", "success"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Suppressed"));
    }

    #[test]
    fn rewrites_failure_emails() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".devupdates.jsonc"),
            r#"{ "notifications": { "siteName": "Example" } }"#,
        )
        .unwrap();

        devupdates_cmd()
            .current_dir(temp_dir.path())
            .args(["notify", "fail", "--to", "admin@example.com"])
            .args(["--subject", "Update failed"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"to\": \"dev@galliweb.ch\""))
            .stdout(predicate::str::contains("[ERROR - Example] Update failed"));
    }
}
