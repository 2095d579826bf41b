//! KV Cache - a cache-aside key-value server
//!
//! An LRU cache in front of a durable SQLite table, served over HTTP, plus a
//! closed-loop load generator for measuring it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod loadgen;
pub mod metrics;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{KvError, Result};
pub use service::KvService;
