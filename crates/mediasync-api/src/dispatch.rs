//! Lane dispatch.
//!
//! Classifies an incoming file reference and launches the matching lane as
//! an independent background task. Classification failures are synchronous;
//! everything past acceptance is fire-and-forget from the caller's view.

use std::sync::Arc;

use mediasync_core::{AppError, Config, FileRef, ProcessingLane};
use mediasync_mirror::Downloader;
use mediasync_warmer::CacheWarmer;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<Config>,
    downloader: Downloader,
    warmer: CacheWarmer,
}

impl Dispatcher {
    pub fn new(config: Arc<Config>, downloader: Downloader, warmer: CacheWarmer) -> Self {
        Self {
            config,
            downloader,
            warmer,
        }
    }

    /// Classify and spawn the matching lane.
    ///
    /// Returns the task handle so a caller that cares (tests, a future
    /// supervisor) can await the outcome; the HTTP handler drops it. The
    /// task runs to completion either way and its failures are logged, not
    /// surfaced.
    pub fn dispatch(&self, file: FileRef) -> Result<JoinHandle<()>, AppError> {
        let lane = ProcessingLane::classify(
            &file.bucket,
            &self.config.image_buckets,
            &self.config.video_buckets,
        );

        match lane {
            ProcessingLane::Video => {
                let downloader = self.downloader.clone();
                Ok(tokio::spawn(async move {
                    run_video_lane(downloader, file).await;
                }))
            }
            ProcessingLane::Image => {
                let warmer = self.warmer.clone();
                Ok(tokio::spawn(async move {
                    run_image_lane(warmer, file).await;
                }))
            }
            ProcessingLane::Unknown => Err(AppError::UnknownBucket(file.bucket)),
        }
    }
}

async fn run_video_lane(downloader: Downloader, file: FileRef) {
    if let Err(err) = downloader.download(&file).await {
        tracing::error!(
            bucket = %file.bucket,
            key = %file.key,
            error = %err,
            "Video mirroring failed"
        );
    }
}

async fn run_image_lane(warmer: CacheWarmer, file: FileRef) {
    let start = std::time::Instant::now();
    let results = warmer.warm(&file).await;
    let failures = results.iter().filter(|result| result.is_err()).count();

    if failures == 0 {
        tracing::info!(
            bucket = %file.bucket,
            key = %file.key,
            paths = results.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image cache warmed"
        );
    } else {
        tracing::warn!(
            bucket = %file.bucket,
            key = %file.key,
            paths = results.len(),
            failures,
            "Image cache warm-up finished with failures"
        );
    }
}
