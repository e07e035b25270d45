//! Init command implementation

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use devupdates_core::UpdaterConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(UpdaterConfig::CONFIG_FILES[0]);
    let template = UpdaterConfig::template();

    match create_exclusive(&config_path, &template) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists && force => {
            // Replace the entry itself rather than writing through a symlink.
            match fs::remove_file(&config_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e).into_diagnostic(),
            }
            create_exclusive(&config_path, &template).into_diagnostic()?;
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(miette::miette!(
                "{} already exists. Use --force to overwrite.",
                config_path.display()
            ));
        }
        Err(e) => return Err(e).into_diagnostic(),
    }

    info!("Created {}", config_path.display());
    Ok(())
}

fn create_exclusive(path: &Path, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)?.write_all(contents.as_bytes())
}
