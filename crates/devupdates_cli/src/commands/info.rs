//! Info command implementation

use std::path::Path;

use devupdates_core::UpdateResolver;
use miette::{IntoDiagnostic, Result};
use tracing::warn;

use crate::utils::load_config;

pub fn run_info(config_path: Option<&Path>, slug: &str, action: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let resolver = UpdateResolver::new(config).into_diagnostic()?;

    match resolver.plugin_information(action, slug) {
        Some(info) => {
            let output = serde_json::to_string_pretty(&info).into_diagnostic()?;
            println!("{}", output);
        }
        None => {
            warn!(
                "Not answering '{}' for '{}': this updater only describes '{}'",
                action,
                slug,
                resolver.slug()
            );
        }
    }

    Ok(())
}
