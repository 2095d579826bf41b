//! API Handlers
//!
//! HTTP request handlers for each key-value server endpoint.
//!
//! Service-core calls may block on the durable store, so they run on the
//! blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::config::Config;
use crate::error::{KvError, Result};
use crate::models::{
    HealthResponse, MetricsResponse, PutRequest, StatsResponse, StatusResponse, ValueResponse,
};
use crate::service::KvService;
use crate::store::{DurableStore, SqliteStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<KvService>,
}

impl AppState {
    pub fn new(service: KvService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Opens the configured SQLite store and builds the service on top of it.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let store: Arc<dyn DurableStore> = Arc::new(SqliteStore::open(&config.db_path)?);
        let service = KvService::with_capacity(config.cache_capacity, store)?;
        Ok(Self::new(service))
    }
}

/// Runs a service-core call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| KvError::Internal(e.to_string()))?
}

/// Handler for PUT /kv/:key
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: std::result::Result<Json<PutRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(req) = body.map_err(|e| KvError::InvalidRequest(e.body_text()))?;

    let service = state.service.clone();
    run_blocking(move || service.write(&key, &req.value)).await?;

    Ok(Json(StatusResponse::ok()))
}

/// Handler for GET /kv/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ValueResponse>> {
    let service = state.service.clone();
    let value = run_blocking(move || service.read(&key)).await?;

    Ok(Json(ValueResponse::new(value)))
}

/// Handler for DELETE /kv/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<StatusResponse>> {
    let service = state.service.clone();
    run_blocking(move || service.remove(&key)).await?;

    Ok(Json(StatusResponse::deleted()))
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(state.service.metrics().snapshot().into())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache().stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_state() -> AppState {
        let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        AppState::new(KvService::with_capacity(100, store).unwrap())
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = test_state();

        let result = put_handler(
            State(state.clone()),
            Path("test_key".to_string()),
            Ok(Json(PutRequest::new("test_value"))),
        )
        .await;
        assert_eq!(result.unwrap().status, "ok");

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(test_state()), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(KvError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        put_handler(
            State(state.clone()),
            Path("to_delete".to_string()),
            Ok(Json(PutRequest::new("value"))),
        )
        .await
        .unwrap();

        let response = delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status, "deleted");

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_metrics_handler_counts_calls() {
        let state = test_state();

        let _ = get_handler(State(state.clone()), Path("a".to_string())).await;
        let _ = delete_handler(State(state.clone()), Path("a".to_string())).await;

        let response = metrics_handler(State(state)).await;
        assert_eq!(response.total_requests, 2);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let response = stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.capacity, 100);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = Config {
            cache_capacity: 0,
            db_path: ":memory:".into(),
            ..Config::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(KvError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_in_memory() {
        let config = Config {
            cache_capacity: 8,
            db_path: ":memory:".into(),
            ..Config::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.service.cache().capacity(), 8);
    }
}
