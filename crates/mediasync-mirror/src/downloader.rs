use std::path::{Path, PathBuf};

use futures::StreamExt;
use mediasync_core::{Attempt, FileRef, RetryError, RetryPolicy};
use reqwest::{Client, StatusCode};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{MirrorError, MirrorResult};

/// Downloads remote objects into a local mirror directory.
///
/// HTTP 403 from the origin is the provider's slow-down signal in this
/// domain, never a permanent authorization failure; it is retried with a
/// fixed backoff. Every other failure ends the attempt loop immediately.
#[derive(Clone)]
pub struct Downloader {
    http: Client,
    base_dir: PathBuf,
    /// Custom origin endpoint (S3-compatible providers). `None` fetches
    /// from the regional AWS URL derived by [`FileRef::source_url`].
    endpoint: Option<String>,
    policy: RetryPolicy,
}

impl Downloader {
    pub fn new(
        http: Client,
        base_dir: impl Into<PathBuf>,
        endpoint: Option<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_dir: base_dir.into(),
            endpoint: endpoint.map(|e| e.trim_end_matches('/').to_string()),
            policy,
        }
    }

    /// Fetch the object and make it visible at its destination path.
    ///
    /// The destination either holds the full object bytes or does not
    /// exist; a pre-existing file is replaced by the final rename, which
    /// makes event redelivery safe.
    pub async fn download(&self, file: &FileRef) -> MirrorResult<PathBuf> {
        let dest = self.key_to_path(&file.key)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        let url = self.object_url(file);
        let start = std::time::Instant::now();

        let result = self
            .policy
            .run(|attempt| {
                let url = url.clone();
                let dest = dest.clone();
                async move {
                    tracing::info!(key = %file.key, attempt, "Downloading object");
                    match self.fetch_once(&url, &dest).await {
                        Ok(FetchOutcome::Stored) => Attempt::Done(()),
                        Ok(FetchOutcome::RateLimited) => {
                            tracing::info!(key = %file.key, attempt, "Origin rate-limited the download");
                            Attempt::Retry
                        }
                        Err(err) => Attempt::Fail(err),
                    }
                }
            })
            .await;

        match result {
            Ok(()) => {
                tracing::info!(
                    key = %file.key,
                    path = %dest.display(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object mirrored"
                );
                Ok(dest)
            }
            Err(RetryError::Fatal(err)) => Err(err),
            Err(RetryError::Exhausted { attempts }) => {
                Err(MirrorError::RetriesExhausted { attempts })
            }
        }
    }

    /// Convert an object key to its destination path, rejecting keys that
    /// would escape the mirror directory.
    fn key_to_path(&self, key: &str) -> MirrorResult<PathBuf> {
        if key.is_empty() {
            return Err(MirrorError::InvalidKey("object key is empty".to_string()));
        }
        if key.starts_with('/') || key.split('/').any(|segment| segment == "..") {
            return Err(MirrorError::InvalidKey(
                "object key escapes the mirror directory".to_string(),
            ));
        }
        Ok(self.base_dir.join(key))
    }

    fn object_url(&self, file: &FileRef) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint, file.bucket, file.key),
            None => file.source_url(),
        }
    }

    async fn fetch_once(&self, url: &str, dest: &Path) -> MirrorResult<FetchOutcome> {
        let response = self.http.get(url).send().await?;

        if response.status() == StatusCode::FORBIDDEN {
            return Ok(FetchOutcome::RateLimited);
        }
        if response.status() != StatusCode::OK {
            return Err(MirrorError::OriginStatus(response.status()));
        }

        // Temp names are unique per attempt, so concurrent downloads into
        // the same directory never collide on the temp file.
        let tmp = self.base_dir.join(format!(".sync-{}.part", Uuid::new_v4()));
        if let Err(err) = store_body(response, &tmp).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err);
        }

        if let Err(err) = fs::rename(&tmp, dest).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        Ok(FetchOutcome::Stored)
    }
}

enum FetchOutcome {
    Stored,
    RateLimited,
}

async fn store_body(response: reqwest::Response, tmp: &Path) -> MirrorResult<()> {
    let mut file = fs::File::create(tmp).await?;

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }
    file.sync_all().await?;

    Ok(())
}
