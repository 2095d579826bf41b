//! KV Service Module
//!
//! Cache-aside orchestration of the LRU cache and the durable store.
//!
//! Mutations always commit to the durable store first and update the cache
//! second. A failure between the two steps can leave the cache stale, never
//! ahead of what the store committed; the next miss re-reads durable state.
//! Two writers racing on one key may leave the cache holding either value
//! when their durable commits are concurrent.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::cache::LruCache;
use crate::error::{KvError, Result};
use crate::metrics::Metrics;
use crate::store::DurableStore;

// == KV Service ==
/// Read/write/delete entry points used by the HTTP layer.
pub struct KvService {
    cache: LruCache,
    store: Arc<dyn DurableStore>,
    metrics: Arc<Metrics>,
}

impl KvService {
    // == Constructor ==
    pub fn new(cache: LruCache, store: Arc<dyn DurableStore>, metrics: Arc<Metrics>) -> Self {
        Self {
            cache,
            store,
            metrics,
        }
    }

    /// Builds a service with a fresh cache of `capacity` and its own metrics.
    pub fn with_capacity(capacity: usize, store: Arc<dyn DurableStore>) -> Result<Self> {
        Ok(Self::new(
            LruCache::new(capacity)?,
            store,
            Arc::new(Metrics::new()),
        ))
    }

    // == Read ==
    /// Returns the value for `key`, warming the cache on a miss.
    ///
    /// Fails with `NotFound` when neither the cache nor the store has it.
    pub fn read(&self, key: &str) -> Result<String> {
        self.timed(|| {
            if let Some(value) = self.cache.get(key) {
                return Ok(value);
            }

            match self.store.get(key)? {
                Some(value) => {
                    if let Some(evicted) = self.cache.put(key, value.as_str()) {
                        debug!(key, evicted = %evicted, "cache warmed on miss");
                    }
                    Ok(value)
                }
                None => Err(KvError::NotFound(key.to_string())),
            }
        })
    }

    // == Write ==
    /// Upserts durably, then caches the value.
    ///
    /// If the durable write fails the cache is left untouched.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        self.timed(|| {
            if let Err(err) = self.store.upsert(key, value) {
                warn!(key, error = %err, "durable write failed");
                return Err(err);
            }

            if let Some(evicted) = self.cache.put(key, value) {
                debug!(key, evicted = %evicted, "cache insert evicted entry");
            }
            Ok(())
        })
    }

    // == Remove ==
    /// Deletes durably, then drops the key from the cache.
    ///
    /// Removing a key that does not exist succeeds. If the durable delete
    /// fails the cache is left untouched.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.timed(|| {
            if let Err(err) = self.store.delete(key) {
                warn!(key, error = %err, "durable delete failed");
                return Err(err);
            }

            self.cache.delete(key);
            Ok(())
        })
    }

    pub fn cache(&self) -> &LruCache {
        &self.cache
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Runs one operation and records its latency once the outcome is known.
    fn timed<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        let start = Instant::now();
        let result = op();
        self.metrics.record(start.elapsed());
        result
    }
}
