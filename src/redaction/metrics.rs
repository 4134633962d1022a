//! Engine metrics
//!
//! All counters live behind a single mutex. Snapshots are deep copies taken
//! under that lock, so a reader never observes a half-applied batch.

use crate::redaction::redactor::RedactionCounts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Point-in-time copy of the engine counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Total records processed
    pub processed_records: u64,

    /// Redactions by pattern name
    pub redacted_items: HashMap<String, u64>,

    /// Cumulative batch processing time in nanoseconds
    pub processing_time_ns: u64,

    /// When counting started (engine creation or last reset)
    pub since: DateTime<Utc>,
}

impl Metrics {
    /// Cumulative processing time
    pub fn processing_time(&self) -> Duration {
        Duration::from_nanos(self.processing_time_ns)
    }

    /// Total redactions across all patterns
    pub fn total_redactions(&self) -> u64 {
        self.redacted_items.values().sum()
    }

    /// Redactions for one pattern name, zero if it never fired
    pub fn redactions_for(&self, name: &str) -> u64 {
        self.redacted_items.get(name).copied().unwrap_or(0)
    }

    /// Log the snapshot
    pub fn log_summary(&self) {
        tracing::info!(
            processed_records = self.processed_records,
            total_redactions = self.total_redactions(),
            processing_time_ms = self.processing_time().as_millis() as u64,
            since = %self.since,
            "Redaction metrics"
        );
    }
}

/// Mutex-guarded metrics store owned by the engine
#[derive(Debug)]
pub struct MetricsStore {
    inner: Mutex<Metrics>,
}

impl MetricsStore {
    /// Create a store with a zero counter for every known pattern name
    pub fn new<'a>(pattern_names: impl IntoIterator<Item = &'a str>) -> Self {
        let redacted_items = pattern_names
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();

        Self {
            inner: Mutex::new(Metrics {
                processed_records: 0,
                redacted_items,
                processing_time_ns: 0,
                since: Utc::now(),
            }),
        }
    }

    // Every mutation is a plain increment, so a poisoned guard is still consistent
    fn lock(&self) -> MutexGuard<'_, Metrics> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge one batch under a single lock acquisition
    pub fn record_batch<'a>(
        &self,
        records: u64,
        elapsed: Duration,
        counts: impl IntoIterator<Item = &'a RedactionCounts>,
    ) {
        let mut metrics = self.lock();
        metrics.processed_records += records;
        metrics.processing_time_ns += u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);

        for record_counts in counts {
            for (name, count) in record_counts {
                *metrics.redacted_items.entry(name.clone()).or_insert(0) += count;
            }
        }
    }

    /// Deep copy of the current counters
    pub fn snapshot(&self) -> Metrics {
        self.lock().clone()
    }

    /// Zero every counter, keeping the known pattern names
    pub fn reset(&self) {
        let mut metrics = self.lock();
        metrics.processed_records = 0;
        metrics.processing_time_ns = 0;
        for count in metrics.redacted_items.values_mut() {
            *count = 0;
        }
        metrics.since = Utc::now();
    }
}
