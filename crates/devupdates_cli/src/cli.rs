//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// devupdates - self-update checks for a GitHub-released plugin
#[derive(Parser)]
#[command(name = "devupdates")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the release registry for a newer version
    Check {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 1 when an update is available
        #[arg(long)]
        exit_code: bool,
    },

    /// Show package details for a plugin slug
    Info {
        /// Plugin slug
        slug: String,

        /// Request action
        #[arg(long, default_value = "plugin_information")]
        action: String,
    },

    /// Rename an extracted update archive to the plugin folder name
    Relocate {
        /// Extracted archive directory
        source: PathBuf,

        /// Basename of the plugin being installed (defaults to this plugin)
        #[arg(long)]
        plugin: Option<String>,
    },

    /// Preview the notification policy for an update email
    Notify {
        /// Email kind (success, fail, critical)
        kind: String,

        /// Original subject
        #[arg(long)]
        subject: Option<String>,

        /// Original recipient
        #[arg(long, default_value = "")]
        to: String,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
