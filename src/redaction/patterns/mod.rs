//! Pattern library for PII detection
//!
//! Patterns are described in TOML (an ordered `[[patterns]]` array) and
//! compiled into [`PatternDefinition`]s. The built-in library is embedded in
//! the binary; additional libraries of the same shape can be loaded from disk.

pub mod validators;

use crate::domain::{RedactError, Result};
use crate::redaction::config::RedactionConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Built-in pattern library, in application order
const BUILTIN_PATTERNS_TOML: &str = include_str!("../../../patterns/builtin_patterns.toml");

/// Signature shared by all validators
pub type ValidatorFn = dyn Fn(&str) -> bool + Send + Sync;

/// Named confirmation check applied to each regex candidate
#[derive(Clone)]
pub struct Validator {
    name: String,
    check: Arc<ValidatorFn>,
}

impl Validator {
    /// Wrap an arbitrary check function
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Look up one of the built-in validators (`ssn`, `luhn`, `aba`)
    pub fn builtin(name: &str) -> Option<Self> {
        validators::by_name(name).map(|check| Self::new(name.to_lowercase(), check))
    }

    /// Validator name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check against a matched candidate
    pub fn check(&self, candidate: &str) -> bool {
        (self.check)(candidate)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

/// A compiled detection pattern
///
/// `name` doubles as the redaction label and the metrics key, so it must be
/// unique within an active pattern set.
#[derive(Debug, Clone)]
pub struct PatternDefinition {
    /// Pattern name (uppercase by convention, e.g. `SSN`)
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// Optional validator; without one every match counts as PII
    pub validator: Option<Validator>,
}

impl PatternDefinition {
    /// Create a pattern from an already compiled regex
    pub fn new(name: impl Into<String>, regex: Regex) -> Self {
        Self {
            name: name.into(),
            regex,
            validator: None,
        }
    }

    /// Compile a pattern expression
    ///
    /// # Errors
    ///
    /// Returns [`RedactError::InvalidPattern`] if the expression does not parse.
    pub fn compile(name: impl Into<String>, expression: &str) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(expression).map_err(|e| RedactError::invalid_pattern(&name, &e))?;
        Ok(Self::new(name, regex))
    }

    /// Attach a validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Whether a matched candidate is confirmed PII
    pub fn confirms(&self, candidate: &str) -> bool {
        self.validator
            .as_ref()
            .map_or(true, |validator| validator.check(candidate))
    }
}

/// Pattern entry as written in a TOML library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEntry {
    /// Pattern name / redaction label
    pub name: String,
    /// Regex expression
    pub regex: String,
    /// Optional built-in validator name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PatternEntry {
    /// Compile this entry, resolving its validator by name
    pub fn compile(&self) -> Result<PatternDefinition> {
        let pattern = PatternDefinition::compile(&self.name, &self.regex)?;

        match self.validator.as_deref() {
            None => Ok(pattern),
            Some(name) => {
                let validator = Validator::builtin(name).ok_or_else(|| {
                    RedactError::Configuration(format!(
                        "Unknown validator '{}' for pattern '{}'. Must be one of: ssn, luhn, aba",
                        name, self.name
                    ))
                })?;
                Ok(pattern.with_validator(validator))
            }
        }
    }
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    patterns: Vec<PatternEntry>,
}

/// Ordered registry of compiled patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<PatternDefinition>,
}

impl PatternRegistry {
    /// Create a registry from a TOML pattern library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RedactError::Configuration(format!(
                "Failed to read pattern library {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a registry from TOML content, keeping declaration order
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)?;

        let patterns = library
            .patterns
            .iter()
            .map(PatternEntry::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// The built-in registry: SSN, CC, PHONE, ROUTING, DL, EMAIL, IP, PASSPORT, DOB
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_PATTERNS_TOML)
    }

    /// Get all patterns in application order
    pub fn all_patterns(&self) -> &[PatternDefinition] {
        &self.patterns
    }

    /// Get a pattern by name
    pub fn get(&self, name: &str) -> Option<&PatternDefinition> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Pattern names in application order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Build the active pattern list for a configuration
    ///
    /// Built-in patterns come first, in declaration order, skipping any whose
    /// name is explicitly disabled (a missing entry means enabled). Then come
    /// the inline custom patterns, the entries of `pattern_library` if set, and
    /// finally `extra`, each in the order supplied.
    pub fn active_patterns(
        &self,
        config: &RedactionConfig,
        extra: Vec<PatternDefinition>,
    ) -> Result<Vec<PatternDefinition>> {
        let mut active: Vec<PatternDefinition> = self
            .patterns
            .iter()
            .filter(|p| config.is_pattern_enabled(&p.name))
            .cloned()
            .collect();

        for entry in &config.custom_patterns {
            active.push(entry.compile()?);
        }

        if let Some(ref path) = config.pattern_library {
            let library = Self::from_file(path)?;
            active.extend(library.patterns);
        }

        active.extend(extra);
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builtin_order() {
        let registry = PatternRegistry::builtin().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            ["SSN", "CC", "PHONE", "ROUTING", "DL", "EMAIL", "IP", "PASSPORT", "DOB"]
        );
    }

    #[test]
    fn test_builtin_validators_attached() {
        let registry = PatternRegistry::builtin().unwrap();
        let validator_of = |name: &str| {
            registry
                .get(name)
                .and_then(|p| p.validator.as_ref())
                .map(|v| v.name().to_string())
        };

        assert_eq!(validator_of("SSN").as_deref(), Some("ssn"));
        assert_eq!(validator_of("CC").as_deref(), Some("luhn"));
        assert_eq!(validator_of("ROUTING").as_deref(), Some("aba"));
        assert_eq!(validator_of("PHONE"), None);
        assert_eq!(validator_of("DL"), None);
    }

    #[test]
    fn test_phone_pattern_shapes() {
        let registry = PatternRegistry::builtin().unwrap();
        let phone = &registry.get("PHONE").unwrap().regex;

        assert!(phone.is_match("Call me at 555-123-4567"));
        assert!(phone.is_match("Call (555) 123-4567"));
        assert!(phone.is_match("+1 404.555.1212"));
        assert!(!phone.is_match("card 4111 1111 1111 1111"));
    }

    #[test]
    fn test_dob_pattern_shapes() {
        let registry = PatternRegistry::builtin().unwrap();
        let dob = &registry.get("DOB").unwrap().regex;

        assert!(dob.is_match("born 04/17/1985"));
        assert!(dob.is_match("born 1985-04-17"));
        assert!(dob.is_match("born March 3rd, 1990"));
        assert!(!dob.is_match("version 13/45/1985"));
    }

    #[test]
    fn test_disabled_builtin_is_skipped() {
        let registry = PatternRegistry::builtin().unwrap();
        let config = RedactionConfig {
            enabled_patterns: HashMap::from([("CC".to_string(), false)]),
            ..RedactionConfig::default()
        };

        let active = registry.active_patterns(&config, Vec::new()).unwrap();
        assert_eq!(active.len(), registry.len() - 1);
        assert!(active.iter().all(|p| p.name != "CC"));
    }

    #[test]
    fn test_custom_patterns_follow_builtins() {
        let registry = PatternRegistry::builtin().unwrap();
        let mut config = RedactionConfig::default();
        config.custom_patterns.push(PatternEntry {
            name: "EMPLOYEE_ID".to_string(),
            regex: r"\bEMP-\d{6}\b".to_string(),
            validator: None,
            description: None,
        });
        let extra = vec![PatternDefinition::compile("TICKET", r"\bTCK-\d+\b").unwrap()];

        let active = registry.active_patterns(&config, extra).unwrap();
        let tail: Vec<&str> = active.iter().rev().take(2).map(|p| p.name.as_str()).collect();
        assert_eq!(tail, ["TICKET", "EMPLOYEE_ID"]);
    }

    #[test]
    fn test_invalid_custom_regex_is_an_error() {
        let registry = PatternRegistry::builtin().unwrap();
        let mut config = RedactionConfig::default();
        config.custom_patterns.push(PatternEntry {
            name: "BROKEN".to_string(),
            regex: "(unclosed".to_string(),
            validator: None,
            description: None,
        });

        let err = registry.active_patterns(&config, Vec::new()).unwrap_err();
        assert!(matches!(err, RedactError::InvalidPattern { ref name, .. } if name == "BROKEN"));
    }

    #[test]
    fn test_unknown_validator_is_an_error() {
        let toml = r#"
[[patterns]]
name = "IBAN"
regex = '\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b'
validator = "mod97"
"#;
        let err = PatternRegistry::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("Unknown validator 'mod97'"));
    }

    #[test]
    fn test_custom_validator_closure() {
        let pattern = PatternDefinition::compile("EVEN", r"\d+")
            .unwrap()
            .with_validator(Validator::new("even", |s| {
                s.parse::<u64>().map(|n| n % 2 == 0).unwrap_or(false)
            }));

        assert!(pattern.confirms("42"));
        assert!(!pattern.confirms("43"));
    }
}
