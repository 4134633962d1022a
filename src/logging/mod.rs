//! Logging and observability
//!
//! Library code only emits `tracing` events. The binary installs the
//! subscriber:
//! - Human-readable console output on stderr
//! - Optional JSON log file with rotation
//! - Levels from `--log-level`, the config file, or `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use piiredact::logging::init_logging;
//! use piiredact::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::console_only())
//!     .expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};
