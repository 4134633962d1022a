// piiredact - Pattern-based PII redaction engine
// Copyright (c) 2025 piiredact Contributors
// Licensed under the MIT License

//! # piiredact - PII redaction for short text records
//!
//! piiredact finds personally identifiable information in text (typically
//! speech-to-text transcription chunks) and replaces it with labels such as
//! `[SSN]` or `[EMAIL]`.
//!
//! ## Overview
//!
//! - **Detection** with an ordered list of named regex patterns
//! - **Confirmation** of candidates with checksum validators (Luhn, SSN
//!   issuance rules, ABA routing checksum)
//! - **Batch processing** across a bounded pool of workers, with results in
//!   input order
//! - **Metrics** for processed records, redactions per pattern, and time spent
//!
//! ## Architecture
//!
//! - [`redaction`] - patterns, validators, redactor, engine, metrics
//! - [`domain`] - records and error types
//! - [`config`] - configuration loading and validation
//! - [`logging`] - tracing subscriber setup
//! - [`cli`] - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use piiredact::config::RedactionConfig;
//! use piiredact::domain::Record;
//! use piiredact::redaction::Engine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Engine::new(RedactionConfig::default())?;
//!
//!     let records = vec![
//!         Record::new("c1", "A", "My SSN is 123-45-6789"),
//!         Record::new("c2", "B", "my card is 4111 1111 1111 1111"),
//!     ];
//!     let redacted = engine.process(records).await?;
//!
//!     assert_eq!(redacted[0].text, "My SSN is [SSN]");
//!     assert_eq!(redacted[1].text, "my card is [CC]");
//!     Ok(())
//! }
//! ```
//!
//! ## One-shot helpers
//!
//! Without an engine, the built-in patterns are applied with a
//! `[REDACTED:<LABEL>]` replacement:
//!
//! ```rust
//! let text = piiredact::redaction::redact_pii("call 555-123-4567")?;
//! assert_eq!(text, "call [REDACTED:PHONE]");
//! # Ok::<(), piiredact::domain::RedactError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], backed by
//! [`domain::RedactError`]. Only configuration and I/O problems are errors; a
//! pattern that finds nothing is not.

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod redaction;
