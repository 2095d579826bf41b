//! Load Generator Module
//!
//! Closed-loop HTTP client for the key-value server: each worker sends one
//! request, waits for the response, then sends the next, until the run's
//! deadline.

mod config;
mod report;
mod runner;
mod stats;
mod workload;

pub use config::LoadgenConfig;
pub use report::{csv_report, write_csv};
pub use runner::LoadGenerator;
pub use stats::{percentile, RunSummary, Sample};
pub use workload::{KeySpace, Request, Workload};
