//! CLI interface and argument parsing
//!
//! This module provides the command-line interface of the catalog feed using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// Level used when neither the CLI nor the configuration names one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Catalog Feed - keyset-paginated product feed export
#[derive(Parser, Debug)]
#[command(name = "catalog-feed")]
#[command(version, about, long_about = None)]
#[command(author = "Catalog Feed Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "catalog-feed.toml", env = "CATALOG_FEED_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CATALOG_FEED_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the catalog of a snapshot file as JSON Lines
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Log level and logging configuration for this invocation
    ///
    /// Commands that read the configuration file use its `[logging]` section
    /// and `application.log_level`; `--log-level` wins over the file. When the
    /// file cannot be loaded, logging falls back to the console and the
    /// command itself reports the configuration error.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        let console_only = LoggingConfig {
            local_enabled: false,
            ..LoggingConfig::default()
        };

        let loaded = match self.command {
            Commands::Export(_) | Commands::ValidateConfig(_) => load_config(&self.config).ok(),
            Commands::Init(_) => None,
        };

        match loaded {
            Some(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            None => (
                self.log_level
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                console_only,
            ),
        }
    }
}
