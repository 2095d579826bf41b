//! Cache Statistics Module
//!
//! Hit/miss/eviction counters kept alongside the LRU under the cache lock.

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from memory
    pub hits: u64,
    /// Lookups that had to fall through to the durable store
    pub misses: u64,
    /// Entries dropped because an insert exceeded capacity
    pub evictions: u64,
    /// Entries currently resident
    pub total_entries: usize,
    /// Fixed maximum number of resident entries
    pub capacity: usize,
}

impl CacheStats {
    /// Creates zeroed counters for a cache of the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }

    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
