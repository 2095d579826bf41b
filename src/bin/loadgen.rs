//! Closed-loop load generator for the KV cache server.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kv_cache::loadgen::{write_csv, LoadGenerator, LoadgenConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kv_cache=info,loadgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LoadgenConfig::parse();
    info!(
        "Starting loadgen: server={} threads={} duration={}s workload={} keyspace={} popular={} putpct={}",
        config.url,
        config.threads,
        config.duration,
        config.workload,
        config.keyspace,
        config.popular,
        config.putpct
    );

    let out = config.out.clone();
    let generator = LoadGenerator::new(config)?;
    let summary = generator.run().await.context("load run failed")?;

    println!("{}", summary);

    write_csv(&out, &summary, chrono::Utc::now())?;
    println!("Results written to {}", out.display());

    Ok(())
}
