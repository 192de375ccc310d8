//! CLI command implementations.

pub mod config;
pub mod manifest;

use clap::{Args, Subcommand};

/// Arguments for the manifest command.
#[derive(Args)]
pub struct ManifestArgs {
    /// Project directory (default: config `[project] root`, then current directory).
    #[arg(short, long)]
    pub project: Option<String>,

    /// Platform sent as the `platform` query parameter.
    #[arg(long)]
    pub platform: Option<String>,

    /// Platform sent as the `expo-platform` header.
    #[arg(long)]
    pub platform_header: Option<String>,

    /// Value of the `Host` header.
    #[arg(long)]
    pub host: Option<String>,

    /// Request path (default: the configured route).
    #[arg(long)]
    pub path: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
