//! Configuration management for piiredact.
//!
//! # Overview
//!
//! piiredact reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PIIREDACT_*` environment overrides
//! - Default values for every setting
//! - Validation before the engine is built
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [redaction]
//! redaction_format = "[%s]"
//! max_concurrency = 8
//! logging = false
//!
//! [redaction.enabled_patterns]
//! DOB = false
//!
//! [[redaction.custom_patterns]]
//! name = "EMPLOYEE_ID"
//! regex = '\bEMP-\d{6}\b'
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! local_rotation = "daily"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use piiredact::config::load_config;
//!
//! # fn example() {
//! match load_config("piiredact.toml") {
//!     Ok(config) => println!("max concurrency: {}", config.redaction.effective_concurrency()),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::redaction::config::{RedactionConfig, RedactionFormat};
pub use loader::{default_config, load_config, load_config_str};
pub use schema::{ApplicationConfig, LoggingConfig, PiiRedactConfig};
