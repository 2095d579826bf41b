//! Run statistics: throughput, mean and percentile latency.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::loadgen::Workload;

/// Outcome of one request.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub latency: Duration,
    /// True iff the server answered with a 2xx status
    pub ok: bool,
}

// == Percentile ==
/// Returns the `p`-th percentile of ascending `sorted` values.
///
/// Interpolates linearly between the two order statistics around rank
/// `p / 100 * (n - 1)`. Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[u64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo] as f64;
    }

    let frac = rank - lo as f64;
    sorted[lo] as f64 * (1.0 - frac) + sorted[hi] as f64 * frac
}

// == Run Summary ==
/// End-of-run statistics. Latencies are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub workload: String,
    pub threads: u32,
    pub duration_s: u64,
    pub total_requests: u64,
    pub successful: u64,
    pub errors: u64,
    /// Requests per second over the configured duration
    pub throughput_rps: f64,
    pub avg_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p99_ms: f64,
}

impl RunSummary {
    pub fn from_samples(
        workload: Workload,
        threads: u32,
        duration: Duration,
        samples: &[Sample],
    ) -> Self {
        let mut latencies: Vec<u64> = samples
            .iter()
            .map(|s| u64::try_from(s.latency.as_nanos()).unwrap_or(u64::MAX))
            .collect();
        latencies.sort_unstable();

        let total_requests = samples.len() as u64;
        let successful = samples.iter().filter(|s| s.ok).count() as u64;

        let avg_ns = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().map(|&ns| ns as f64).sum::<f64>() / latencies.len() as f64
        };

        let secs = duration.as_secs_f64();
        let throughput_rps = if secs > 0.0 {
            total_requests as f64 / secs
        } else {
            0.0
        };

        Self {
            workload: workload.to_string(),
            threads,
            duration_s: duration.as_secs(),
            total_requests,
            successful,
            errors: total_requests - successful,
            throughput_rps,
            avg_ms: avg_ns / 1e6,
            p50_ms: percentile(&latencies, 50.0) / 1e6,
            p90_ms: percentile(&latencies, 90.0) / 1e6,
            p99_ms: percentile(&latencies, 99.0) / 1e6,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== SUMMARY =====")?;
        writeln!(f, "Workload: {}", self.workload)?;
        writeln!(f, "Threads: {}, Duration(s): {}", self.threads, self.duration_s)?;
        writeln!(f, "Total requests: {}", self.total_requests)?;
        writeln!(f, "Successful requests: {}", self.successful)?;
        writeln!(f, "Errors: {}", self.errors)?;
        writeln!(f, "Throughput (req/s): {:.3}", self.throughput_rps)?;
        writeln!(f, "Avg latency (ms): {:.6}", self.avg_ms)?;
        write!(
            f,
            "p50 (ms): {:.6} p90 (ms): {:.6} p99 (ms): {:.6}",
            self.p50_ms, self.p90_ms, self.p99_ms
        )
    }
}
