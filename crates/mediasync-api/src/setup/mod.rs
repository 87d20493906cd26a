//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mediasync_core::{Config, RetryPolicy};
use mediasync_mirror::Downloader;
use mediasync_warmer::CacheWarmer;

use crate::dispatch::Dispatcher;
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = build_state(config)?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}

/// Build the application state (shared HTTP client, lane components,
/// dispatcher) without touching global telemetry; tests call this directly.
pub fn build_state(config: Config) -> Result<Arc<AppState>> {
    let http = reqwest::Client::builder()
        .timeout(config.http_client_timeout)
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .context("Failed to create HTTP client")?;

    let downloader = Downloader::new(
        http.clone(),
        config.base_dir.clone(),
        config.source_endpoint.clone(),
        RetryPolicy::new(config.download_max_attempts, config.download_backoff),
    );

    // Validation guarantees a thumbor URL whenever an image lane exists;
    // without image buckets the warmer is never dispatched to.
    let warmer = CacheWarmer::new(
        http,
        config.thumbor_url.clone().unwrap_or_default(),
        config.thumbor_key.clone(),
        config.thumbor_paths.clone(),
        RetryPolicy::new(config.warmup_max_attempts, Duration::ZERO),
    );

    let config = Arc::new(config);
    let dispatcher = Dispatcher::new(config.clone(), downloader, warmer);

    Ok(Arc::new(AppState { config, dispatcher }))
}
