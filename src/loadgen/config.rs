//! Load generator command line.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::loadgen::Workload;

/// Closed-loop load generator for the KV cache server
#[derive(Debug, Clone, Parser)]
#[command(name = "loadgen", version, about)]
pub struct LoadgenConfig {
    /// Base URL of the KV server
    #[arg(long, env = "LOADGEN_URL", default_value = "http://localhost:8080")]
    pub url: String,

    /// Number of concurrent closed-loop workers
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    /// Test duration in seconds
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    pub duration: u64,

    /// Request mix
    #[arg(long, value_enum, default_value_t = Workload::GetPopular)]
    pub workload: Workload,

    /// Number of unique keys for getall/putall/getput
    #[arg(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub keyspace: u64,

    /// Number of hot keys for getpopular
    #[arg(long, default_value_t = 100)]
    pub popular: u64,

    /// Percentage of puts in getput (0-100)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub putpct: u8,

    /// Number of keys written before read workloads start
    #[arg(long, default_value_t = 1000)]
    pub seed_count: u64,

    /// CSV output filename
    #[arg(long, default_value = "results.csv")]
    pub out: PathBuf,
}

impl LoadgenConfig {
    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }
}
