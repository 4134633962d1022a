//! Init command implementation
//!
//! Writes a commented configuration file with every setting at its default.

use crate::cli::{DEFAULT_CONFIG_PATH, EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} to enable or disable patterns", self.output);
                println!("  2. Validate configuration: piiredact validate-config");
                println!("  3. Redact: piiredact redact < input.txt > output.txt");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the default configuration file content
    pub fn generate_config() -> String {
        r#"# piiredact configuration file

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[redaction]
# Replacement label; exactly one %s, substituted with the pattern name
redaction_format = "[%s]"

# Maximum records redacted concurrently per batch (<= 0 means 8)
max_concurrency = 8

# Log one line per batch and one per record that had redactions
logging = false

# Optional TOML pattern library appended after custom_patterns
# pattern_library = "patterns/extra.toml"

# Built-in patterns are enabled unless listed here as false
[redaction.enabled_patterns]
SSN = true
CC = true
PHONE = true
ROUTING = true
DL = true
EMAIL = true
IP = true
PASSPORT = true
DOB = true

# Custom patterns run after the built-ins, in the order listed.
# validator may be one of: ssn, luhn, aba
# [[redaction.custom_patterns]]
# name = "EMPLOYEE_ID"
# regex = '\bEMP-\d{6}\b'

[logging]
# JSON log file in addition to console output
local_enabled = false
local_path = "logs"
# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
