//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piiredact using clap.

pub mod commands;

use crate::config::{default_config, load_config, PiiRedactConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "piiredact.toml";

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;

/// Exit code for configuration problems
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for fatal runtime errors
pub const EXIT_FATAL: i32 = 5;

/// piiredact - pattern-based PII redaction
#[derive(Parser, Debug)]
#[command(name = "piiredact")]
#[command(version, about, long_about = None)]
#[command(author = "piiredact Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "PIIREDACT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact newline-delimited text (stdin to stdout by default)
    Redact(commands::redact::RedactArgs),

    /// Redact a JSON array of records
    Batch(commands::batch::BatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Load the application configuration for a CLI run
///
/// A missing file at the default location means "run with defaults". Any
/// other missing path is an error.
pub fn load_app_config(config_path: &str) -> Result<PiiRedactConfig> {
    if config_path == DEFAULT_CONFIG_PATH && !Path::new(config_path).exists() {
        tracing::debug!("No configuration file found, using defaults");
        return default_config();
    }
    load_config(config_path)
}
