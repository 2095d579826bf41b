//! End-to-end runs of the load generator against a live server.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use kv_cache::{
    api::create_router,
    loadgen::{LoadGenerator, LoadgenConfig, Request},
    store::{DurableStore, MemoryStore},
    AppState, KvService,
};

async fn spawn_server(store: Arc<MemoryStore>) -> (SocketAddr, AppState) {
    let service = KvService::with_capacity(1_000, store).unwrap();
    let state = AppState::new(service);
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

fn config(addr: SocketAddr, args: &[&str]) -> LoadgenConfig {
    let url = format!("http://{}", addr);
    let mut argv = vec!["loadgen", "--url", url.as_str(), "--duration", "1"];
    argv.extend_from_slice(args);
    LoadgenConfig::try_parse_from(argv).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_getpopular_run_seeds_and_succeeds() {
    let store = Arc::new(MemoryStore::new());
    let (addr, state) = spawn_server(store.clone()).await;

    let generator = LoadGenerator::new(config(
        addr,
        &[
            "--threads",
            "2",
            "--workload",
            "getpopular",
            "--keyspace",
            "50",
            "--popular",
            "5",
        ],
    ))
    .unwrap();
    let summary = generator.run().await.unwrap();

    // seed_count defaults to 1000 but is capped by the keyspace
    assert_eq!(store.len(), 50);
    assert_eq!(store.get("k-0").unwrap(), Some("seed-val".to_string()));

    assert!(summary.total_requests > 0);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.successful, summary.total_requests);
    assert_eq!(summary.workload, "getpopular");
    assert!(summary.p50_ms <= summary.p90_ms && summary.p90_ms <= summary.p99_ms);

    // 50 seed writes plus every measured request went through the service core
    let recorded = state.service.metrics().snapshot().total_requests;
    assert_eq!(recorded, 50 + summary.total_requests);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_putall_run_writes_without_seeding() {
    let store = Arc::new(MemoryStore::new());
    let (addr, _) = spawn_server(store.clone()).await;

    let generator = LoadGenerator::new(config(
        addr,
        &["--threads", "2", "--workload", "putall", "--keyspace", "20"],
    ))
    .unwrap();
    let summary = generator.run().await.unwrap();

    assert!(summary.total_requests > 0);
    assert_eq!(summary.errors, 0);
    assert!(!store.is_empty());
    assert!(store.len() <= 20);
}

#[tokio::test]
async fn test_send_to_unreachable_server_is_failure() {
    // port 9 (discard) on localhost is expected to refuse connections
    let config = LoadgenConfig::try_parse_from(["loadgen", "--url", "http://127.0.0.1:9"]).unwrap();
    let generator = LoadGenerator::new(config).unwrap();

    assert!(!generator.send(&Request::Get("k-0".to_string())).await);
}
