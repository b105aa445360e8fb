//! Registry counters
//!
//! - Counters only, monotonic
//! - Atomic so `&self` lookups can record them

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one `IndexRegistry`.
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct IndexMetrics {
    indexes_built: AtomicU64,
    indexes_dropped: AtomicU64,
    rows_indexed: AtomicU64,
    lookups: AtomicU64,
    lookup_misses: AtomicU64,
    combined_queries: AtomicU64,
    source_replacements: AtomicU64,
    rejected_operations: AtomicU64,
}

impl IndexMetrics {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one index build over `rows` rows
    pub fn record_build(&self, rows: u64) {
        self.indexes_built.fetch_add(1, Ordering::Relaxed);
        self.rows_indexed.fetch_add(rows, Ordering::Relaxed);
    }

    /// Record `count` indexes removed
    pub fn record_drops(&self, count: u64) {
        self.indexes_dropped.fetch_add(count, Ordering::Relaxed);
    }

    /// Record one single-key lookup
    pub fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.lookup_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one combined query
    pub fn increment_combined_queries(&self) {
        self.combined_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one snapshot swap
    pub fn increment_source_replacements(&self) {
        self.source_replacements.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one call that returned an `IndexError`
    pub fn increment_rejected(&self) {
        self.rejected_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            indexes_built: self.indexes_built.load(Ordering::Relaxed),
            indexes_dropped: self.indexes_dropped.load(Ordering::Relaxed),
            rows_indexed: self.rows_indexed.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            combined_queries: self.combined_queries.load(Ordering::Relaxed),
            source_replacements: self.source_replacements.load(Ordering::Relaxed),
            rejected_operations: self.rejected_operations.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub indexes_built: u64,
    pub indexes_dropped: u64,
    pub rows_indexed: u64,
    pub lookups: u64,
    pub lookup_misses: u64,
    pub combined_queries: u64,
    pub source_replacements: u64,
    pub rejected_operations: u64,
}
