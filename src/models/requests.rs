//! Request DTOs for the key-value server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Serialize};

/// Request body for `PUT /kv/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutRequest {
    /// The value to store under the path key
    pub value: String,
}

impl PutRequest {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let req: PutRequest = serde_json::from_str(r#"{"value": "hello"}"#).unwrap();
        assert_eq!(req.value, "hello");
    }

    #[test]
    fn test_put_request_missing_value() {
        assert!(serde_json::from_str::<PutRequest>(r#"{"val": "hello"}"#).is_err());
    }

    #[test]
    fn test_put_request_serialize() {
        let json = serde_json::to_string(&PutRequest::new("v-1")).unwrap();
        assert_eq!(json, r#"{"value":"v-1"}"#);
    }
}
