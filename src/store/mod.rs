//! Durable Store Module
//!
//! The persistent key/value table behind the cache. The service core only
//! depends on the [`DurableStore`] trait.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;

// == Durable Store ==
/// Point lookup, upsert and delete on a durable key/value table.
///
/// Implementations provide their own per-key isolation. Calls may block.
pub trait DurableStore: Send + Sync {
    /// Returns the stored value, or `None` if the key has no row.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or overwrites the row for `key` (last write wins).
    fn upsert(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the row for `key`. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<()>;
}
