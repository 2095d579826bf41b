//! Closed-loop runner.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::loadgen::{KeySpace, LoadgenConfig, Request, RunSummary, Sample};
use crate::models::PutRequest;

/// Per-request client timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Seeding requests allowed in flight at once.
const SEED_CONCURRENCY: usize = 50;
const SEED_VALUE: &str = "seed-val";

// == Load Generator ==
#[derive(Debug, Clone)]
pub struct LoadGenerator {
    config: LoadgenConfig,
    client: reqwest::Client,
    keys: Arc<KeySpace>,
    base_url: Arc<str>,
}

impl LoadGenerator {
    pub fn new(config: LoadgenConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        let keys = Arc::new(KeySpace::new(config.keyspace, config.popular));
        let base_url: Arc<str> = config.url.trim_end_matches('/').into();

        Ok(Self {
            config,
            client,
            keys,
            base_url,
        })
    }

    // == Run ==
    /// Seeds if the workload reads, then drives the workers until the deadline.
    pub async fn run(&self) -> anyhow::Result<RunSummary> {
        if self.config.workload.needs_seed() {
            self.seed().await?;
        }

        let duration = self.config.run_duration();
        let deadline = Instant::now() + duration;
        let base_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();

        let mut workers = JoinSet::new();
        for id in 0..self.config.threads {
            let this = self.clone();
            let seed = base_seed.wrapping_add(u64::from(id));
            workers.spawn(async move { this.worker(seed, deadline).await });
        }

        let mut samples = Vec::new();
        while let Some(joined) = workers.join_next().await {
            samples.extend(joined.context("worker task failed")?);
        }

        Ok(RunSummary::from_samples(
            self.config.workload,
            self.config.threads,
            duration,
            &samples,
        ))
    }

    /// One closed-loop worker: send, wait, record, repeat.
    async fn worker(&self, seed: u64, deadline: Instant) -> Vec<Sample> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut samples = Vec::new();

        while Instant::now() < deadline {
            let request =
                self.config
                    .workload
                    .next_request(&mut rng, &self.keys, self.config.putpct);
            let start = Instant::now();
            let ok = self.send(&request).await;
            samples.push(Sample {
                latency: start.elapsed(),
                ok,
            });
        }

        debug!(requests = samples.len(), "worker finished");
        samples
    }

    // == Seed ==
    /// Writes the first `seed_count` keys so reads have something to find.
    async fn seed(&self) -> anyhow::Result<()> {
        let count = self.config.seed_count.min(self.keys.size());
        info!("Seeding {} keys ...", count);

        let permits = Arc::new(Semaphore::new(SEED_CONCURRENCY));
        let mut tasks = JoinSet::new();
        for index in 0..count {
            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .context("seed semaphore closed")?;
            let this = self.clone();
            tasks.spawn(async move {
                let request = Request::Put(KeySpace::key(index), SEED_VALUE.to_string());
                let ok = this.send(&request).await;
                drop(permit);
                ok
            });
        }

        let mut failed = 0u64;
        while let Some(joined) = tasks.join_next().await {
            if !joined.context("seed task failed")? {
                failed += 1;
            }
        }

        info!("Seed complete ({} failed)", failed);
        Ok(())
    }

    /// Sends one request; true iff the response status is 2xx.
    pub async fn send(&self, request: &Request) -> bool {
        let url = format!("{}/kv/{}", self.base_url, request.key());
        let result = match request {
            Request::Get(_) => self.client.get(&url).send().await,
            Request::Put(_, value) => {
                self.client
                    .put(&url)
                    .json(&PutRequest::new(value.as_str()))
                    .send()
                    .await
            }
        };

        match result {
            Ok(response) => {
                let ok = response.status().is_success();
                // drain so the connection goes back to the pool
                let _ = response.bytes().await;
                ok
            }
            Err(err) => {
                debug!(error = %err, "request failed");
                false
            }
        }
    }
}
