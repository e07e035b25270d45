//! CLI utility functions

use std::path::Path;

use devupdates_core::UpdaterConfig;
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};

/// Loads the config at `path`, or the first one discovered in the working directory.
pub fn load_config(path: Option<&Path>) -> Result<UpdaterConfig> {
    if let Some(path) = path {
        return UpdaterConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = UpdaterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return UpdaterConfig::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(UpdaterConfig::new())
}
