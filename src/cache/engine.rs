//! Cache Engine Module
//!
//! Thread-safe LRU cache: an [`LruCore`] and its statistics behind one mutex.

use parking_lot::Mutex;
use tracing::trace;

use crate::cache::{CacheStats, LruCore};
use crate::error::Result;

struct Guarded {
    lru: LruCore,
    stats: CacheStats,
}

// == LRU Cache ==
/// Bounded, recency-ordered, thread-safe key/value cache.
///
/// Every operation holds the single internal lock for its full duration,
/// so operations on one cache are linearizable. The cache never talks to
/// the durable store; coordinating the two is the service core's job.
pub struct LruCache {
    inner: Mutex<Guarded>,
    capacity: usize,
}

impl LruCache {
    // == Constructor ==
    /// Creates an empty cache. Fails with a config error if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let lru = LruCore::new(capacity)?;
        Ok(Self {
            inner: Mutex::new(Guarded {
                lru,
                stats: CacheStats::with_capacity(capacity),
            }),
            capacity,
        })
    }

    // == Get ==
    /// Returns the cached value and marks the key most recently used.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let value = inner.lru.get(key).cloned();
        inner.stats.record_lookup(value.is_some());
        value
    }

    // == Put ==
    /// Inserts or overwrites a key, evicting the LRU entry on overflow.
    ///
    /// Returns the evicted key, if any.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let evicted = inner.lru.put(key.into(), value.into());
        if let Some(entry) = &evicted {
            inner.stats.record_eviction();
            trace!(key = %entry.key, "evicted least recently used entry");
        }
        evicted.map(|entry| entry.key)
    }

    // == Delete ==
    /// Removes a key. Returns whether it was resident.
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().lru.delete(key).is_some()
    }

    /// Returns true if the key is resident, without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().lru.contains(key)
    }

    /// Returns the least recently used key, without touching recency.
    pub fn peek_lru(&self) -> Option<String> {
        self.inner.lock().lru.peek_lru().map(str::to_string)
    }

    /// Resident keys from most to least recently used.
    pub fn keys_mru(&self) -> Vec<String> {
        self.inner.lock().lru.keys_mru()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().lru.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns a copy of the counters with the current entry count filled in.
    pub fn stats(&self) -> CacheStats {
        let guard = self.inner.lock();
        let mut stats = guard.stats.clone();
        stats.total_entries = guard.lru.len();
        stats
    }

    /// See [`LruCore::is_consistent`].
    pub fn is_consistent(&self) -> bool {
        self.inner.lock().lru.is_consistent()
    }
}

impl std::fmt::Debug for LruCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
