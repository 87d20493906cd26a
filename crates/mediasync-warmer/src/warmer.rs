use mediasync_core::{Attempt, FileRef, RetryError, RetryPolicy};
use reqwest::Client;
use thiserror::Error;

use crate::signer;

/// Cache warm-up errors, scoped to a single transformation path
#[derive(Debug, Error)]
pub enum WarmError {
    #[error("Cache request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Cache never reported a hit, gave up after {attempts} attempts")]
    NeverHit { attempts: u32 },
}

/// Warms a thumbor-compatible image cache for each configured
/// transformation path.
///
/// A warm-up request is polling, not RPC: the cache answers 200 for hits
/// and misses alike, and a miss means generation was kicked off but has not
/// landed yet. Re-requesting until the `X-Cache` header reports a hit is
/// what confirms the transformed asset is actually cached.
#[derive(Clone)]
pub struct CacheWarmer {
    http: Client,
    base_url: String,
    signing_key: Option<String>,
    paths: Vec<String>,
    policy: RetryPolicy,
}

impl CacheWarmer {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        signing_key: Option<String>,
        paths: Vec<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signing_key,
            paths,
            policy,
        }
    }

    /// Warm every configured transformation path for the given object.
    ///
    /// Paths are warmed independently; a failure on one path does not abort
    /// the others. Returns one result per configured path, in configuration
    /// order.
    pub async fn warm(&self, file: &FileRef) -> Vec<Result<(), WarmError>> {
        let mut results = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let result = self.warm_path(file, path).await;
            if let Err(err) = &result {
                tracing::error!(
                    key = %file.key,
                    transformation = %path,
                    error = %err,
                    "Cache warm-up failed"
                );
            }
            results.push(result);
        }
        results
    }

    async fn warm_path(&self, file: &FileRef, path: &str) -> Result<(), WarmError> {
        let cache_path = format!("{}/{}", path, file.public_url());
        // The token covers the whole cache path and is identical across
        // retries.
        let token = signer::access_token(&cache_path, self.signing_key.as_deref());
        let url = format!("{}/{}/{}", self.base_url, token, cache_path);

        let outcome = self
            .policy
            .run(|attempt| {
                let url = url.clone();
                async move {
                    let response = match self.http.get(&url).send().await {
                        Ok(response) => response,
                        Err(err) => return Attempt::Fail(WarmError::from(err)),
                    };

                    if cache_hit(&response) {
                        tracing::info!(key = %file.key, transformation = %path, attempt, "Cache hit");
                        Attempt::Done(())
                    } else {
                        tracing::info!(key = %file.key, transformation = %path, attempt, "Cache not hit yet");
                        Attempt::Retry
                    }
                }
            })
            .await;

        match outcome {
            Ok(()) => Ok(()),
            Err(RetryError::Fatal(err)) => Err(err),
            Err(RetryError::Exhausted { attempts }) => Err(WarmError::NeverHit { attempts }),
        }
    }
}

/// Warmth is read from the `X-Cache` response header, not the status code.
fn cache_hit(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get("x-cache")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("hit"))
        .unwrap_or(false)
}
