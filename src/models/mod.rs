//! Request and Response models for the key-value server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies. The load
//! generator reuses them on the client side.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::PutRequest;
pub use responses::{
    ErrorResponse, HealthResponse, MetricsResponse, StatsResponse, StatusResponse, ValueResponse,
};
