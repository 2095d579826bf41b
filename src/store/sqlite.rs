//! SQLite durable store.
//!
//! One `kv` table, `key TEXT PRIMARY KEY, value TEXT NOT NULL`. The schema is
//! created on open if it does not exist.

use std::path::Path;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, warn};

use crate::error::{KvError, Result};
use crate::store::DurableStore;

/// Attempts made to open the database before giving up.
const OPEN_ATTEMPTS: u32 = 5;
/// Pause between open attempts.
const OPEN_RETRY_DELAY: Duration = Duration::from_secs(2);

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

// == SQLite Store ==
/// [`DurableStore`] over a single SQLite connection.
///
/// Calls are serialized on the connection mutex; SQLite's busy timeout
/// covers contention with other processes.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    // == Open ==
    /// Opens (or creates) the database file and bootstraps the schema.
    ///
    /// The path `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut attempt = 1;
        let conn = loop {
            match Connection::open(path) {
                Ok(conn) => break conn,
                Err(err) if attempt < OPEN_ATTEMPTS => {
                    warn!(
                        "Failed to open database {} (attempt {}/{}): {}, retrying",
                        path.display(),
                        attempt,
                        OPEN_ATTEMPTS,
                        err
                    );
                    attempt += 1;
                    thread::sleep(OPEN_RETRY_DELAY);
                }
                Err(err) => return Err(err.into()),
            }
        };

        let store = Self::from_connection(conn)?;
        info!("Opened durable store at {}", path.display());
        Ok(store)
    }

    /// Opens a private in-memory database with the schema in place.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| KvError::Store(format!("failed creating schema: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl DurableStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn upsert(&self, key: &str, value: &str) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .lock()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}
