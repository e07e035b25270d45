//! Check command implementation

use std::path::Path;

use devupdates_core::UpdateResolver;
use miette::{IntoDiagnostic, Result};

use crate::utils::load_config;

/// Runs a version check. Returns whether an update is available.
pub fn run_check(config_path: Option<&Path>, json: bool) -> Result<bool> {
    let config = load_config(config_path)?;
    let resolver = UpdateResolver::new(config).into_diagnostic()?;
    let candidate = resolver.check_for_update();

    if json {
        let output = serde_json::to_string_pretty(&candidate).into_diagnostic()?;
        println!("{}", output);
        return Ok(candidate.available);
    }

    match (&candidate.remote_version, &candidate.package_url) {
        (Some(remote), Some(package)) if candidate.available => {
            println!(
                "Update available: {} -> {}",
                candidate.current_version, remote
            );
            println!("Package: {}", package);
        }
        (Some(remote), _) => {
            println!(
                "Up to date: {} (latest release {})",
                candidate.current_version, remote
            );
        }
        (None, _) => {
            println!(
                "No release information available (installed {})",
                candidate.current_version
            );
        }
    }

    Ok(candidate.available)
}
