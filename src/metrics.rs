//! Metrics Module
//!
//! Request count and cumulative latency for the service core.

use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Default)]
struct Counters {
    total_requests: u64,
    cumulative_latency: Duration,
}

// == Metrics ==
/// Latency aggregator shared by every service-core operation.
///
/// Count and sum are updated and read under one lock, so a snapshot never
/// pairs a count with a sum from a different moment. The lock is independent
/// of the cache lock.
#[derive(Debug, Default)]
pub struct Metrics {
    counters: Mutex<Counters>,
}

/// Aggregate view returned by [`Metrics::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub avg_latency_ms: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Counts one request that took `duration`.
    pub fn record(&self, duration: Duration) {
        let mut counters = self.counters.lock();
        counters.total_requests += 1;
        counters.cumulative_latency += duration;
    }

    // == Snapshot ==
    /// Returns the request count and mean latency in milliseconds.
    ///
    /// The mean is 0.0 until the first request is recorded.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self.counters.lock();
        let avg_latency_ms = if counters.total_requests > 0 {
            counters.cumulative_latency.as_secs_f64() * 1000.0 / counters.total_requests as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            total_requests: counters.total_requests,
            avg_latency_ms,
        }
    }
}
