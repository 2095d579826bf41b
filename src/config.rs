//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{KvError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub cache_capacity: usize,
    /// SQLite database path (`:memory:` for an in-memory database)
    pub db_path: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or non-numeric values fall back to the defaults. A numeric
    /// `KV_CACHE_CAP` that is zero or negative is a config error.
    ///
    /// # Environment Variables
    /// - `KV_PORT` - HTTP server port (default: 8080)
    /// - `KV_CACHE_CAP` - Maximum cache entries (default: 10000)
    /// - `KV_DB_PATH` - SQLite database path (default: kv.db)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            server_port: env_or("KV_PORT", defaults.server_port),
            cache_capacity: parse_capacity(
                env::var("KV_CACHE_CAP").ok().as_deref(),
                defaults.cache_capacity,
            )?,
            db_path: env::var("KV_DB_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.db_path),
        })
    }

    /// Rejects configurations the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(KvError::Config(
                "KV_CACHE_CAP must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses a raw `KV_CACHE_CAP` value as a signed integer so that negative
/// capacities are rejected instead of falling back to the default.
fn parse_capacity(raw: Option<&str>, default: usize) -> Result<usize> {
    let Some(cap) = raw.and_then(|v| v.trim().parse::<i64>().ok()) else {
        return Ok(default);
    };
    if cap <= 0 {
        return Err(KvError::Config(format!(
            "KV_CACHE_CAP must be greater than zero, got {}",
            cap
        )));
    }
    usize::try_from(cap).map_err(|_| KvError::Config(format!("KV_CACHE_CAP {} is too large", cap)))
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_capacity: 10_000,
            db_path: "kv.db".to_string(),
        }
    }
}
