//! PII redaction
//!
//! - [`patterns`] - built-in and user pattern libraries, validators
//! - [`redactor`] - single-text match and replace
//! - [`engine`] - concurrent batch processing with metrics
//! - [`stream`] - one-shot and line-stream helpers over the built-in set
//! - [`mask`] - last-four masking for display

pub mod config;
pub mod engine;
pub mod mask;
pub mod metrics;
pub mod patterns;
pub mod redactor;
pub mod stream;

pub use config::{RedactionConfig, RedactionFormat};
pub use engine::Engine;
pub use mask::{mask_credit_card, mask_ssn};
pub use metrics::Metrics;
pub use patterns::{PatternDefinition, PatternEntry, PatternRegistry, Validator};
pub use redactor::{Redaction, RedactionCounts, Redactor};
pub use stream::{match_pii, redact_pii, redact_stream, redact_with_options, RedactOptions};
