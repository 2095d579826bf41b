//! CSV report for a finished run.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::loadgen::RunSummary;

const CSV_HEADER: &str = "timestamp,workload,threads,duration_s,total_requests,successful,errors,throughput_rps,avg_ms,p50_ms,p90_ms,p99_ms";

/// Renders the header and one data row.
pub fn csv_report(summary: &RunSummary, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}\n{},{},{},{},{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6}\n",
        CSV_HEADER,
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        summary.workload,
        summary.threads,
        summary.duration_s,
        summary.total_requests,
        summary.successful,
        summary.errors,
        summary.throughput_rps,
        summary.avg_ms,
        summary.p50_ms,
        summary.p90_ms,
        summary.p99_ms,
    )
}

/// Writes the report to `path`, replacing any existing file.
pub fn write_csv(path: &Path, summary: &RunSummary, timestamp: DateTime<Utc>) -> anyhow::Result<()> {
    fs::write(path, csv_report(summary, timestamp))
        .with_context(|| format!("failed to write csv {}", path.display()))
}
