//! Relocate command implementation

use std::path::Path;

use devupdates_core::{HookExtra, UpdateResolver};
use miette::{IntoDiagnostic, Result};

use crate::utils::load_config;

pub fn run_relocate(config_path: Option<&Path>, source: &Path, plugin: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let resolver = UpdateResolver::new(config).into_diagnostic()?;

    let event = HookExtra::for_plugin(plugin.unwrap_or(resolver.plugin_basename()));
    let resolved = resolver.relocate_extracted_source(source, &event);

    println!("{}", resolved.display());
    Ok(())
}
