//! API Module
//!
//! HTTP handlers and routing for the key-value server REST API.
//!
//! # Endpoints
//! - `PUT /kv/:key` - Store a value
//! - `GET /kv/:key` - Retrieve a value
//! - `DELETE /kv/:key` - Delete a key
//! - `GET /metrics` - Request count and mean latency
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
