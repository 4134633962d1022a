//! Validate config command implementation
//!
//! Loads and validates the configuration, then builds an engine so pattern
//! compilation problems surface here rather than on first use.

use crate::cli::{load_app_config, EXIT_CONFIG, EXIT_OK};
use crate::redaction::Engine;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_app_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration loaded and validated");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let engine = match Engine::new(config.redaction.clone()) {
            Ok(engine) => {
                println!("✅ All patterns compiled");
                engine
            }
            Err(e) => {
                println!("❌ Failed to build redaction engine");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Redaction Format: {}",
            config.redaction.redaction_format.as_str()
        );
        println!(
            "  Max Concurrency: {}",
            config.redaction.effective_concurrency()
        );
        println!("  Record Logging: {}", config.redaction.logging);
        println!("  Active Patterns: {}", engine.pattern_names().join(", "));
        if let Some(ref library) = config.redaction.pattern_library {
            println!("  Pattern Library: {}", library.display());
        }
        if config.logging.local_enabled {
            println!(
                "  Log File: {}/piiredact.log ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(EXIT_OK)
    }
}
