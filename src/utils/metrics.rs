//! Observability and Metrics
//!
//! Counters for encode and decode activity, shared between threads with
//! relaxed atomics. Each [`crate::protocol::codec::RecipeCodec`] records into
//! its own [`Metrics`] unless handed the global instance.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Metrics collector for codec operations
#[derive(Debug)]
pub struct Metrics {
    /// Collections written
    pub collections_encoded: AtomicU64,
    /// Collections fully decoded
    pub collections_decoded: AtomicU64,
    /// Recipe records written
    pub recipes_encoded: AtomicU64,
    /// Recipe records decoded as part of a successful decode
    pub recipes_decoded: AtomicU64,
    /// Total bytes written
    pub bytes_encoded: AtomicU64,
    /// Total bytes consumed by successful decodes
    pub bytes_decoded: AtomicU64,
    /// Decodes aborted by an error
    pub decode_errors: AtomicU64,
    /// Decodes aborted by an unassigned recipe tag
    pub unknown_tags: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            collections_encoded: AtomicU64::new(0),
            collections_decoded: AtomicU64::new(0),
            recipes_encoded: AtomicU64::new(0),
            recipes_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            unknown_tags: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a written collection
    pub fn collection_encoded(&self, recipe_count: u64, byte_count: u64) {
        self.collections_encoded.fetch_add(1, Ordering::Relaxed);
        self.recipes_encoded.fetch_add(recipe_count, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a successfully decoded collection
    pub fn collection_decoded(&self, recipe_count: u64, byte_count: u64) {
        self.collections_decoded.fetch_add(1, Ordering::Relaxed);
        self.recipes_decoded.fetch_add(recipe_count, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record an aborted decode
    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a decode aborted by an unassigned tag
    pub fn unknown_tag(&self) {
        self.unknown_tags.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            collections_encoded: self.collections_encoded.load(Ordering::Relaxed),
            collections_decoded: self.collections_decoded.load(Ordering::Relaxed),
            recipes_encoded: self.recipes_encoded.load(Ordering::Relaxed),
            recipes_decoded: self.recipes_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            unknown_tags: self.unknown_tags.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            collections_encoded = snapshot.collections_encoded,
            collections_decoded = snapshot.collections_decoded,
            recipes_encoded = snapshot.recipes_encoded,
            recipes_decoded = snapshot.recipes_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            decode_errors = snapshot.decode_errors,
            unknown_tags = snapshot.unknown_tags,
            uptime_seconds = snapshot.uptime_seconds,
            "Recipe codec metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub collections_encoded: u64,
    pub collections_decoded: u64,
    pub recipes_encoded: u64,
    pub recipes_decoded: u64,
    pub bytes_encoded: u64,
    pub bytes_decoded: u64,
    pub decode_errors: u64,
    pub unknown_tags: u64,
    pub uptime_seconds: u64,
}

/// Global metrics instance
static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| Arc::new(Metrics::new()));

/// Get the global metrics instance
pub fn global_metrics() -> Arc<Metrics> {
    Arc::clone(&METRICS)
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let metrics = Metrics::new();
        metrics.collection_encoded(3, 120);
        metrics.collection_decoded(3, 120);
        metrics.decode_error();
        metrics.unknown_tag();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.collections_encoded, 1);
        assert_eq!(snapshot.recipes_encoded, 3);
        assert_eq!(snapshot.bytes_decoded, 120);
        assert_eq!(snapshot.decode_errors, 1);
        assert_eq!(snapshot.unknown_tags, 1);
    }

    #[test]
    fn test_global_is_shared() {
        let a = global_metrics();
        let b = global_metrics();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
