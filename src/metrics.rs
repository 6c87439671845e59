//! Fetch latency and success tracking
//!
//! Keeps a rolling window of per-ticker fetch latencies plus lifetime
//! counters, and summarizes them once per refresh cycle.

use crate::constants::METRICS_WINDOW;
use std::collections::VecDeque;
use std::time::Duration;

/// Summary of fetch health
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    /// 50th percentile latency of successful fetches in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency of successful fetches in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    /// Total number of fetches
    pub total_fetches: u64,
    /// Number of failed fetches
    pub failed_fetches: u64,
}

#[derive(Debug, Clone)]
struct LatencySample {
    duration_ms: f64,
    success: bool,
}

/// Collects fetch samples for one provider
///
/// Only touched from the refresh cycle, which already runs exclusively, so
/// no locking is needed here.
#[derive(Debug)]
pub struct FetchMetrics {
    samples: VecDeque<LatencySample>,
    capacity: usize,
    total_fetches: u64,
    failed_fetches: u64,
}

impl FetchMetrics {
    pub fn new() -> Self {
        Self::with_capacity(METRICS_WINDOW)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            total_fetches: 0,
            failed_fetches: 0,
        }
    }

    /// Records a fetch with its duration and outcome
    pub fn record(&mut self, duration: Duration, success: bool) {
        self.total_fetches += 1;
        if !success {
            self.failed_fetches += 1;
        }

        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(LatencySample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes the current summary
    pub fn summary(&self) -> FetchSummary {
        let mut latencies: Vec<f64> = self
            .samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(|a, b| a.total_cmp(b));

        let success_rate = if self.total_fetches > 0 {
            (self.total_fetches - self.failed_fetches) as f64 / self.total_fetches as f64
        } else {
            1.0
        };

        FetchSummary {
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_fetches: self.total_fetches,
            failed_fetches: self.failed_fetches,
        }
    }
}

impl Default for FetchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}
