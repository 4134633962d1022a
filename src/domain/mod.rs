//! Domain models and types for piiredact.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`Record`]) - the unit of text the engine redacts
//! - **Error types** ([`RedactError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, RedactError>`]:
//!
//! ```rust
//! use piiredact::domain::{RedactError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = piiredact::config::RedactionConfig::default();
//!     let _engine = piiredact::redaction::Engine::new(config)?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

pub use errors::RedactError;
pub use record::Record;
pub use result::Result;
