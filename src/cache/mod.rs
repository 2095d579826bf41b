//! Cache Module
//!
//! In-memory LRU cache engine: a bounded, recency-ordered map guarded by a
//! single lock.

mod engine;
mod entry;
mod lru;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use engine::LruCache;
pub use entry::{CacheEntry, SlotId};
pub use lru::LruCore;
pub use stats::CacheStats;
