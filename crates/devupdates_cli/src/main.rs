//! devupdates CLI
//!
//! Checks a GitHub release registry for plugin updates and previews the
//! update-notification policy.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod utils;

use cli::{Cli, Commands};
use commands::check::run_check;
use commands::info::run_info;
use commands::init::run_init;
use commands::notify::run_notify;
use commands::relocate::run_relocate;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(signal) => {
            if signal {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Check { json, exit_code } => {
            let available = run_check(config_path, *json)?;
            Ok(*exit_code && available)
        }
        Commands::Info { slug, action } => run_info(config_path, slug, action).map(|_| false),
        Commands::Relocate { source, plugin } => {
            run_relocate(config_path, source, plugin.as_deref()).map(|_| false)
        }
        Commands::Notify { kind, subject, to } => {
            run_notify(config_path, kind, subject.clone(), to).map(|_| false)
        }
        Commands::Init { force } => run_init(*force).map(|_| false),
    }
}
