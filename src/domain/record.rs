//! Record model
//!
//! A record is one unit of text submitted for redaction, typically a
//! speech-to-text transcription chunk.

use serde::{Deserialize, Serialize};

/// A single text record that may contain PII
///
/// `id` and `label` pass through the engine untouched; only `text` is rewritten.
/// On input, `uuid` and `speaker` are accepted as aliases so transcription
/// chunk payloads deserialize directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Opaque identifier (e.g. a uuidv7)
    #[serde(alias = "uuid")]
    pub id: String,

    /// Optional secondary label such as a speaker tag ("A", "B")
    #[serde(default, alias = "speaker")]
    pub label: String,

    /// Text body, potentially containing PII
    pub text: String,
}

impl Record {
    /// Create a new record
    pub fn new(id: impl Into<String>, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            text: text.into(),
        }
    }

    /// Return this record with its text body replaced
    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }
}
