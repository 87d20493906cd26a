//! Test helpers: stub upstream servers and a configured test application.
//!
//! Run from the workspace root: `cargo test -p mediasync-api`.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use mediasync_api::setup;
use mediasync_core::Config;
use tempfile::TempDir;

/// Test application: server plus the mirror directory it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub base_dir: TempDir,
}

impl TestApp {
    /// Build an app against stub upstream endpoints, with fast retries.
    pub fn new(source_endpoint: Option<String>, thumbor_url: Option<String>) -> Self {
        let base_dir = TempDir::new().unwrap();
        let config = test_config(base_dir.path(), source_endpoint, thumbor_url);
        config.validate().unwrap();

        let state = setup::build_state(config).unwrap();
        let server = TestServer::new(setup::routes::setup_routes(state)).unwrap();

        TestApp { server, base_dir }
    }
}

fn test_config(
    base_dir: &Path,
    source_endpoint: Option<String>,
    thumbor_url: Option<String>,
) -> Config {
    Config {
        http_address: "127.0.0.1:0".to_string(),
        base_dir: base_dir.to_path_buf(),
        source_endpoint,
        image_buckets: HashSet::from(["images-prod".to_string()]),
        video_buckets: HashSet::from(["videos-prod".to_string()]),
        thumbor_url: Some(thumbor_url.unwrap_or_else(|| "http://127.0.0.1:9".to_string())),
        thumbor_key: None,
        thumbor_paths: vec!["300x200".to_string(), "600x400".to_string()],
        download_max_attempts: 5,
        download_backoff: Duration::from_millis(10),
        warmup_max_attempts: 5,
        http_client_timeout: Duration::from_secs(5),
    }
}

/// Bind a stub upstream on an ephemeral port and serve `router` from it.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Poll `check` until it returns true or the timeout elapses.
pub async fn wait_until<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
