//! Error types for the key-value server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == KV Error Enum ==
/// Unified error type for the cache engine, the durable store and the service core.
#[derive(Error, Debug)]
pub enum KvError {
    /// Key absent from both the cache and the durable store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Durable store operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid configuration, fatal at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for KvError {
    fn from(err: rusqlite::Error) -> Self {
        KvError::Store(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        let status = match &self {
            KvError::NotFound(_) => StatusCode::NOT_FOUND,
            KvError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            KvError::Store(_) | KvError::Config(_) | KvError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the key-value server.
pub type Result<T> = std::result::Result<T, KvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (KvError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (KvError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (KvError::Store("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (KvError::Internal("join".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_rusqlite_error_maps_to_store() {
        let err: KvError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, KvError::Store(_)));
    }
}
