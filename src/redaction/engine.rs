//! Batch redaction engine
//!
//! The [`Engine`] freezes the active pattern list at construction, fans a batch
//! of records out over a bounded pool of blocking workers, and folds every
//! record's counts into a shared [`MetricsStore`].
//!
//! # Examples
//!
//! ```no_run
//! use piiredact::config::RedactionConfig;
//! use piiredact::domain::Record;
//! use piiredact::redaction::Engine;
//!
//! # async fn example() -> piiredact::domain::Result<()> {
//! let engine = Engine::new(RedactionConfig::default())?;
//!
//! let records = vec![Record::new("c1", "A", "My SSN is 123-45-6789")];
//! let redacted = engine.process(records).await?;
//! assert_eq!(redacted[0].text, "My SSN is [SSN]");
//!
//! let metrics = engine.snapshot();
//! println!("{} records processed", metrics.processed_records);
//! # Ok(())
//! # }
//! ```

use crate::domain::{RedactError, Record, Result};
use crate::redaction::config::RedactionConfig;
use crate::redaction::metrics::{Metrics, MetricsStore};
use crate::redaction::patterns::{PatternDefinition, PatternRegistry};
use crate::redaction::redactor::{RedactionCounts, Redactor};
use crate::redaction::stream::stream_lines;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Batch redaction engine
///
/// The engine is safe to share between tasks (wrap it in an `Arc`). Several
/// callers may run [`process`](Self::process) at the same time; each batch is
/// bounded by its own worker limit and all of them feed the same metrics.
#[derive(Debug)]
pub struct Engine {
    config: RedactionConfig,
    redactor: Redactor,
    metrics: MetricsStore,
}

impl Engine {
    /// Build an engine from configuration
    ///
    /// The active pattern list is the enabled built-ins followed by the
    /// configured custom patterns and pattern library.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom pattern does not compile, names an unknown
    /// validator, or the pattern library cannot be read.
    pub fn new(config: RedactionConfig) -> Result<Self> {
        Self::with_custom_patterns(config, Vec::new())
    }

    /// Build an engine with extra, already compiled patterns appended last
    pub fn with_custom_patterns(
        config: RedactionConfig,
        patterns: Vec<PatternDefinition>,
    ) -> Result<Self> {
        let registry = PatternRegistry::builtin()?;
        let active = registry.active_patterns(&config, patterns)?;

        let mut seen = HashSet::new();
        for pattern in &active {
            if !seen.insert(pattern.name.as_str()) {
                tracing::warn!(
                    pattern = %pattern.name,
                    "Pattern name is used more than once; redactions are counted together"
                );
            }
        }

        let metrics = MetricsStore::new(active.iter().map(|p| p.name.as_str()));
        let redactor = Redactor::new(active, &config.redaction_format);

        tracing::debug!(
            patterns = ?redactor.patterns().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            max_concurrency = config.effective_concurrency(),
            "Redaction engine initialized"
        );

        Ok(Self {
            config,
            redactor,
            metrics,
        })
    }

    /// Redact a batch of records
    ///
    /// Output position `i` always holds the redacted form of input record `i`.
    /// A single record, or a worker limit of 1, is processed inline.
    ///
    /// # Errors
    ///
    /// Only fails if a worker task panics or is cancelled
    /// ([`RedactError::Processing`]).
    /// In that case no metrics are recorded for the batch.
    pub async fn process(&self, records: Vec<Record>) -> Result<Vec<Record>> {
        let start = Instant::now();
        let record_count = records.len();
        let concurrency = self.config.effective_concurrency();

        let results = if record_count <= 1 || concurrency == 1 {
            records
                .into_iter()
                .map(|record| self.redactor.redact_record(record))
                .collect::<Vec<_>>()
        } else {
            self.process_concurrent(records, concurrency).await?
        };

        let elapsed = start.elapsed();
        self.finish_batch(&results, elapsed);

        Ok(results.into_iter().map(|(record, _)| record).collect())
    }

    async fn process_concurrent(
        &self,
        records: Vec<Record>,
        concurrency: usize,
    ) -> Result<Vec<(Record, RedactionCounts)>> {
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut handles = Vec::with_capacity(records.len());

        for record in records {
            // Acquired before spawning so at most `concurrency` workers exist at once
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| RedactError::Processing(e.to_string()))?;
            let redactor = self.redactor.clone();

            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                redactor.redact_record(record)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await?);
        }

        Ok(results)
    }

    fn finish_batch(&self, results: &[(Record, RedactionCounts)], elapsed: Duration) {
        self.metrics.record_batch(
            results.len() as u64,
            elapsed,
            results.iter().map(|(_, counts)| counts),
        );

        if !self.config.logging {
            return;
        }

        for (record, counts) in results {
            if counts.is_empty() {
                continue;
            }
            let mut fired: Vec<(&str, u64)> =
                counts.iter().map(|(name, n)| (name.as_str(), *n)).collect();
            fired.sort_unstable();
            tracing::info!(record_id = %record.id, redactions = ?fired, "Record redacted");
        }

        tracing::info!(
            record_count = results.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Batch processed"
        );
    }

    /// Redact newline-delimited text with this engine's patterns and format
    ///
    /// Every line counts as one processed record. Lines read before a read or
    /// write error are still recorded in the metrics.
    pub fn redact_stream<R, W>(&self, reader: R, writer: W) -> Result<u64>
    where
        R: BufRead,
        W: Write,
    {
        let start = Instant::now();
        let mut counts = Vec::new();

        let (lines, outcome) = stream_lines(reader, writer, |segment| {
            let redaction = self.redactor.redact(segment);
            if !redaction.is_empty() {
                counts.push(redaction.counts);
            }
            redaction.text
        });

        let elapsed = start.elapsed();
        self.metrics.record_batch(lines, elapsed, &counts);
        if self.config.logging {
            tracing::info!(
                line_count = lines,
                duration_ms = elapsed.as_millis() as u64,
                "Stream processed"
            );
        }

        outcome.map(|()| lines)
    }

    /// Deep copy of the current metrics
    pub fn snapshot(&self) -> Metrics {
        self.metrics.snapshot()
    }

    /// Zero all metrics
    pub fn reset(&self) {
        self.metrics.reset();
    }

    /// Active pattern names in application order
    pub fn pattern_names(&self) -> Vec<&str> {
        self.redactor.patterns().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::config::RedactionFormat;
    use crate::redaction::patterns::PatternEntry;
    use std::io::Cursor;

    fn records(texts: &[&str]) -> Vec<Record> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Record::new(format!("r{i}"), "A", *text))
            .collect()
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new(RedactionConfig::default()).unwrap();
        assert_eq!(
            engine.pattern_names(),
            ["SSN", "CC", "PHONE", "ROUTING", "DL", "EMAIL", "IP", "PASSPORT", "DOB"]
        );
        assert_eq!(engine.snapshot().redacted_items.len(), 9);
    }

    #[test]
    fn test_invalid_custom_pattern_fails_construction() {
        let mut config = RedactionConfig::default();
        config.custom_patterns.push(PatternEntry {
            name: "BAD".to_string(),
            regex: "[".to_string(),
            validator: None,
            description: None,
        });

        let err = Engine::new(config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_process_single_record() {
        let engine = Engine::new(RedactionConfig::default()).unwrap();
        let output = engine
            .process(records(&["My SSN is 123-45-6789"]))
            .await
            .unwrap();

        assert_eq!(output[0].text, "My SSN is [SSN]");
        assert_eq!(output[0].id, "r0");

        let metrics = engine.snapshot();
        assert_eq!(metrics.processed_records, 1);
        assert_eq!(metrics.redactions_for("SSN"), 1);
    }

    #[tokio::test]
    async fn test_process_empty_batch() {
        let engine = Engine::new(RedactionConfig::default()).unwrap();
        let output = engine.process(Vec::new()).await.unwrap();
        assert!(output.is_empty());
        assert_eq!(engine.snapshot().processed_records, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_batch_keeps_positions() {
        let mut config = RedactionConfig::default();
        config.max_concurrency = 3;
        let engine = Engine::new(config).unwrap();

        let input = records(&[
            "My SSN is 123-45-6789",
            "nothing here",
            "my card is 4111 1111 1111 1111",
            "Call me at 555-123-4567",
            "mail joe@example.com",
        ]);
        let output = engine.process(input.clone()).await.unwrap();

        assert_eq!(output.len(), input.len());
        for (before, after) in input.iter().zip(&output) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.label, after.label);
        }
        assert_eq!(output[0].text, "My SSN is [SSN]");
        assert_eq!(output[1].text, "nothing here");
        assert_eq!(output[2].text, "my card is [CC]");
        assert_eq!(output[3].text, "Call me at [PHONE]");
        assert_eq!(output[4].text, "mail [EMAIL]");

        let metrics = engine.snapshot();
        assert_eq!(metrics.processed_records, 5);
        assert_eq!(metrics.total_redactions(), 4);
    }

    #[tokio::test]
    async fn test_disabled_pattern_passes_through() {
        let mut config = RedactionConfig::default();
        config.enabled_patterns.insert("CC".to_string(), false);
        let engine = Engine::new(config).unwrap();

        let output = engine
            .process(records(&["card 4111 1111 1111 1111"]))
            .await
            .unwrap();
        assert_eq!(output[0].text, "card 4111 1111 1111 1111");
        assert!(!engine.snapshot().redacted_items.contains_key("CC"));
    }

    #[tokio::test]
    async fn test_custom_pattern_and_format() {
        let mut config = RedactionConfig::default();
        config.redaction_format = RedactionFormat::new("<%s>");
        let extra = vec![PatternDefinition::compile("EMPLOYEE_ID", r"\bEMP-\d{6}\b").unwrap()];
        let engine = Engine::with_custom_patterns(config, extra).unwrap();

        let output = engine
            .process(records(&["badge EMP-123456, SSN 123-45-6789"]))
            .await
            .unwrap();
        assert_eq!(output[0].text, "badge <EMPLOYEE_ID>, SSN <SSN>");
    }

    #[tokio::test]
    async fn test_reset_zeroes_metrics() {
        let engine = Engine::new(RedactionConfig::default()).unwrap();
        engine
            .process(records(&["123-45-6789", "234-56-7890"]))
            .await
            .unwrap();
        assert_eq!(engine.snapshot().redactions_for("SSN"), 2);

        engine.reset();

        let metrics = engine.snapshot();
        assert_eq!(metrics.processed_records, 0);
        assert_eq!(metrics.total_redactions(), 0);
        assert_eq!(metrics.processing_time_ns, 0);
    }

    #[tokio::test]
    async fn test_logging_enabled_batch_succeeds() {
        let mut config = RedactionConfig::default();
        config.logging = true;
        let engine = Engine::new(config).unwrap();

        let output = engine
            .process(records(&["SSN 123-45-6789", "plain"]))
            .await
            .unwrap();
        assert_eq!(output[0].text, "SSN [SSN]");
    }

    #[test]
    fn test_engine_stream_uses_engine_format_and_metrics() {
        let mut config = RedactionConfig::default();
        config.redaction_format = RedactionFormat::new("***%s***");
        let engine = Engine::new(config).unwrap();

        let mut output = Vec::new();
        let lines = engine
            .redact_stream(Cursor::new("SSN 123-45-6789\nplain\n"), &mut output)
            .unwrap();

        assert_eq!(lines, 2);
        assert_eq!(String::from_utf8(output).unwrap(), "SSN ***SSN***\nplain\n");

        let metrics = engine.snapshot();
        assert_eq!(metrics.processed_records, 2);
        assert_eq!(metrics.redactions_for("SSN"), 1);
    }
}
