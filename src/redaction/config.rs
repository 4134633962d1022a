//! Redaction engine configuration

use crate::domain::{RedactError, Result};
use crate::redaction::patterns::PatternEntry;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Placeholder substituted with the pattern name in a redaction format
pub const FORMAT_PLACEHOLDER: &str = "%s";

/// Worker bound used when `max_concurrency` is not positive
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Redaction label template, e.g. `[%s]` renders `[SSN]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedactionFormat(String);

impl RedactionFormat {
    /// Create a format from a template string
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Raw template
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the label for a pattern name
    ///
    /// Only the first placeholder is substituted. A template without one
    /// renders as-is.
    pub fn render(&self, name: &str) -> String {
        self.0.replacen(FORMAT_PLACEHOLDER, name, 1)
    }

    /// Check that the template has exactly one placeholder
    pub fn validate(&self) -> Result<()> {
        let count = self.0.matches(FORMAT_PLACEHOLDER).count();
        if count != 1 {
            return Err(RedactError::Configuration(format!(
                "redaction_format '{}' must contain exactly one '{}' placeholder, found {}",
                self.0, FORMAT_PLACEHOLDER, count
            )));
        }
        Ok(())
    }
}

impl Default for RedactionFormat {
    fn default() -> Self {
        Self::new("[%s]")
    }
}

/// Redaction engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Built-in pattern name -> enabled. Missing names default to enabled.
    #[serde(default)]
    pub enabled_patterns: HashMap<String, bool>,

    /// Additional user-defined patterns, applied after the built-ins
    #[serde(default)]
    pub custom_patterns: Vec<PatternEntry>,

    /// Optional TOML pattern library appended after `custom_patterns`
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Redaction label template
    #[serde(default)]
    pub redaction_format: RedactionFormat,

    /// Maximum concurrent redactions per batch; values <= 0 fall back to 8
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: i64,

    /// Emit per-batch and per-record log lines
    #[serde(default)]
    pub logging: bool,
}

fn default_max_concurrency() -> i64 {
    DEFAULT_MAX_CONCURRENCY as i64
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled_patterns: HashMap::new(),
            custom_patterns: Vec::new(),
            pattern_library: None,
            redaction_format: RedactionFormat::default(),
            max_concurrency: default_max_concurrency(),
            logging: false,
        }
    }
}

impl RedactionConfig {
    /// Configuration that enables only the named built-in patterns
    ///
    /// `builtin_names` is the full built-in list; every name not in `enabled`
    /// is explicitly disabled.
    pub fn only<'a>(
        builtin_names: impl IntoIterator<Item = &'a str>,
        enabled: &[&str],
    ) -> Self {
        let enabled_patterns = builtin_names
            .into_iter()
            .map(|name| (name.to_string(), enabled.contains(&name)))
            .collect();

        Self {
            enabled_patterns,
            ..Self::default()
        }
    }

    /// Whether a built-in pattern is enabled (opt-out semantics)
    pub fn is_pattern_enabled(&self, name: &str) -> bool {
        self.enabled_patterns.get(name).copied().unwrap_or(true)
    }

    /// Effective worker bound
    pub fn effective_concurrency(&self) -> usize {
        if self.max_concurrency <= 0 {
            DEFAULT_MAX_CONCURRENCY
        } else {
            self.max_concurrency as usize
        }
    }

    /// Validate the configuration
    ///
    /// This is the caller-side check run by the config loader. Building an
    /// engine does not require it.
    pub fn validate(&self) -> Result<()> {
        self.redaction_format.validate()?;

        let mut seen = HashSet::new();
        for pattern in &self.custom_patterns {
            if pattern.name.trim().is_empty() {
                return Err(RedactError::Configuration(
                    "custom pattern name must not be empty".to_string(),
                ));
            }
            if !seen.insert(pattern.name.as_str()) {
                return Err(RedactError::Configuration(format!(
                    "duplicate custom pattern name '{}'",
                    pattern.name
                )));
            }
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(RedactError::Configuration(format!(
                    "Pattern library file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(RedactError::Configuration(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
