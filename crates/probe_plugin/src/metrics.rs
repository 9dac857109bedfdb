//! Engine-agnostic metrics collection for probe placement statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when
//! disabled.
//!
//! # Usage
//!
//! ```ignore
//! use probe_plugin::metrics::{PlacementMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // After each batch:
//! metrics.record_batch(&summary);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::batch::BatchSummary;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    /// Get the number of values in the window.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear all values.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
        }
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Cumulative placement statistics, fed one batch at a time.
#[derive(Debug, Clone)]
pub struct PlacementMetrics {
    /// Rolling window of batch durations in microseconds.
    pub batch_timings: RollingWindow<u64>,
    /// Last batch duration in microseconds.
    pub last_batch_us: u64,
    /// Batches recorded this session.
    pub total_batches: u64,
    /// Candidates considered across all recorded batches.
    pub total_candidates: u64,
    /// Probes committed across all recorded batches.
    pub total_accepted: u64,
    /// Candidates skipped because a neighbor volume covered them.
    pub total_rejected_reach: u64,
    /// Candidates the resolver could not place.
    pub total_rejected_obstructed: u64,
}

impl Default for PlacementMetrics {
    fn default() -> Self {
        Self {
            batch_timings: RollingWindow::new(64),
            last_batch_us: 0,
            total_batches: 0,
            total_candidates: 0,
            total_accepted: 0,
            total_rejected_reach: 0,
            total_rejected_obstructed: 0,
        }
    }
}

impl PlacementMetrics {
    /// Create new metrics with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one batch run.
    pub fn record_batch(&mut self, summary: &BatchSummary) {
        if !is_enabled() {
            return;
        }

        self.batch_timings.push(summary.elapsed_us);
        self.last_batch_us = summary.elapsed_us;
        self.total_batches += 1;
        self.total_candidates += summary.candidates as u64;
        self.total_accepted += summary.accepted as u64;
        self.total_rejected_reach += summary.rejected_reach as u64;
        self.total_rejected_obstructed += summary.rejected_obstructed as u64;
    }

    /// Average batch duration in microseconds.
    pub fn avg_batch_timing_us(&self) -> f64 {
        self.batch_timings.average()
    }

    /// Fraction of candidates that became probes, 0 when nothing ran.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.total_candidates == 0 {
            0.0
        } else {
            self.total_accepted as f64 / self.total_candidates as f64
        }
    }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
    use super::*;

    fn summary(candidates: usize, accepted: usize, elapsed_us: u64) -> BatchSummary {
        BatchSummary {
            volumes_processed: 1,
            candidates,
            accepted,
            rejected_reach: 0,
            rejected_obstructed: candidates - accepted,
            elapsed_us,
        }
    }

    #[test]
    fn test_rolling_window_eviction() {
        let mut window = RollingWindow::new(3);
        window.push(10u64);
        window.push(20);
        window.push(30);
        window.push(40);

        assert_eq!(window.len(), 3);
        assert_eq!(window.average(), 30.0);
        assert_eq!(window.last(), Some(&40));
    }

    // Single test owns the global toggle; splitting it would race with
    // the parallel test runner.
    #[test]
    fn test_record_batch_accumulates_and_respects_toggle() {
        let mut metrics = PlacementMetrics::new();
        metrics.record_batch(&summary(18, 17, 1000));
        metrics.record_batch(&summary(18, 18, 3000));

        assert_eq!(metrics.total_batches, 2);
        assert_eq!(metrics.total_candidates, 36);
        assert_eq!(metrics.total_accepted, 35);
        assert_eq!(metrics.last_batch_us, 3000);
        assert_eq!(metrics.avg_batch_timing_us(), 2000.0);
        assert!((metrics.acceptance_ratio() - 35.0 / 36.0).abs() < 1e-9);

        COLLECT_METRICS.store(false, Ordering::Relaxed);
        metrics.record_batch(&summary(18, 18, 500));
        assert_eq!(metrics.total_batches, 2);
        COLLECT_METRICS.store(true, Ordering::Relaxed);

        metrics.reset();
        assert_eq!(metrics.total_candidates, 0);
        assert!(metrics.batch_timings.is_empty());
    }
}
