//! Cache Entry Module
//!
//! Defines the key/value pair owned by the cache and the arena node that
//! links entries into recency order.

// == Cache Entry ==
/// A single key/value pair resident in the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    /// The cached key
    pub key: String,
    /// The cached value
    pub value: String,
}

impl CacheEntry {
    /// Creates a new CacheEntry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// == Slot Handle ==
/// Stable handle addressing a node in the arena.
///
/// Handles stay valid until the node is released; released slots are reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

// == Node ==
/// Arena node: an entry plus its neighbours in recency order.
///
/// `prev` points towards the most recently used end, `next` towards the
/// least recently used end.
#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) entry: CacheEntry,
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
}

impl Node {
    pub(crate) fn new(entry: CacheEntry) -> Self {
        Self {
            entry,
            prev: None,
            next: None,
        }
    }
}
