//! Single-text match and replace
//!
//! [`Redactor`] applies an ordered pattern list to one text value. Patterns run
//! in list order and each sees the output of the previous ones. Within one
//! pattern, matches are found in a single scan and replaced from the rightmost
//! backwards so the byte offsets of the remaining matches stay valid.

use crate::domain::{Record, Result};
use crate::redaction::config::RedactionFormat;
use crate::redaction::patterns::{PatternDefinition, PatternRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-pattern redaction counts for one text
pub type RedactionCounts = HashMap<String, u64>;

/// Result of redacting one text value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    /// Redacted text
    pub text: String,
    /// Confirmed replacements by pattern name; patterns that never fired are absent
    pub counts: RedactionCounts,
}

impl Redaction {
    /// Total replacements across all patterns
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Whether anything was redacted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[derive(Debug)]
struct Rule {
    pattern: PatternDefinition,
    label: String,
}

/// Applies an immutable, ordered pattern list to text
///
/// Cloning is cheap: the rules are shared behind an `Arc`, so one redactor can
/// be handed to many worker tasks.
#[derive(Debug, Clone)]
pub struct Redactor {
    rules: Arc<[Rule]>,
}

impl Redactor {
    /// Create a redactor, pre-rendering each pattern's label with `format`
    pub fn new(patterns: Vec<PatternDefinition>, format: &RedactionFormat) -> Self {
        let rules: Vec<Rule> = patterns
            .into_iter()
            .map(|pattern| {
                let label = format.render(&pattern.name);
                Rule { pattern, label }
            })
            .collect();

        Self {
            rules: rules.into(),
        }
    }

    /// Redactor over the built-in pattern set
    pub fn builtin(format: &RedactionFormat) -> Result<Self> {
        let registry = PatternRegistry::builtin()?;
        Ok(Self::new(registry.all_patterns().to_vec(), format))
    }

    /// Active patterns in application order
    pub fn patterns(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.rules.iter().map(|rule| &rule.pattern)
    }

    /// Redact a text value using the configured labels
    pub fn redact(&self, text: &str) -> Redaction {
        self.apply(text, |rule, _| rule.label.clone())
    }

    /// Redact a text value, building each replacement with `replace(name, matched)`
    pub fn redact_with<F>(&self, text: &str, mut replace: F) -> Redaction
    where
        F: FnMut(&str, &str) -> String,
    {
        self.apply(text, |rule, matched| replace(&rule.pattern.name, matched))
    }

    /// Redact a record's text, leaving its identifier and label untouched
    pub fn redact_record(&self, record: Record) -> (Record, RedactionCounts) {
        let Redaction { text, counts } = self.redact(&record.text);
        (record.with_text(text), counts)
    }

    /// Collect confirmed matches by pattern name without rewriting the text
    ///
    /// Every pattern scans the original text, so overlapping detections from
    /// different patterns are all reported.
    pub fn find(&self, text: &str) -> HashMap<String, Vec<String>> {
        let mut found: HashMap<String, Vec<String>> = HashMap::new();

        for rule in self.rules.iter() {
            let confirmed: Vec<String> = rule
                .pattern
                .regex
                .find_iter(text)
                .map(|m| m.as_str())
                .filter(|candidate| rule.pattern.confirms(candidate))
                .map(str::to_string)
                .collect();

            if !confirmed.is_empty() {
                found
                    .entry(rule.pattern.name.clone())
                    .or_default()
                    .extend(confirmed);
            }
        }

        found
    }

    fn apply<F>(&self, text: &str, mut replacement: F) -> Redaction
    where
        F: FnMut(&Rule, &str) -> String,
    {
        let mut redacted = text.to_string();
        let mut counts = RedactionCounts::new();

        for rule in self.rules.iter() {
            let spans: Vec<(usize, usize)> = rule
                .pattern
                .regex
                .find_iter(&redacted)
                .map(|m| (m.start(), m.end()))
                .collect();

            // Rightmost first: replacing a span only shifts offsets after it
            for &(start, end) in spans.iter().rev() {
                let candidate = &redacted[start..end];
                if !rule.pattern.confirms(candidate) {
                    continue;
                }

                let label = replacement(rule, candidate);
                redacted.replace_range(start..end, &label);
                *counts.entry(rule.pattern.name.clone()).or_insert(0) += 1;
            }
        }

        Redaction {
            text: redacted,
            counts,
        }
    }
}
