//! Configuration module
//!
//! All configuration is read from the environment (with `.env` support) and
//! validated once at startup; components receive the values they need
//! through their constructors rather than reading settings ad hoc.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Common constants
const HTTP_ADDRESS: &str = "0.0.0.0:4000";
const BASE_DIR: &str = "/tmp";
const DOWNLOAD_MAX_ATTEMPTS: u32 = 5;
const DOWNLOAD_BACKOFF_SECS: u64 = 1;
const WARMUP_MAX_ATTEMPTS: u32 = 5;
const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Application configuration (sync agent).
#[derive(Clone, Debug)]
pub struct Config {
    /// Listen address for the HTTP front door.
    pub http_address: String,
    /// Root directory the mirrored objects are written under.
    pub base_dir: PathBuf,
    /// Custom origin endpoint for S3-compatible providers (MinIO, stubs in
    /// tests). When unset, objects are fetched from the regional AWS URL.
    pub source_endpoint: Option<String>,
    /// Buckets whose objects take the image lane (cache warm-up).
    pub image_buckets: HashSet<String>,
    /// Buckets whose objects take the video lane (local mirroring).
    pub video_buckets: HashSet<String>,
    pub thumbor_url: Option<String>,
    pub thumbor_key: Option<String>,
    /// Transformation paths warmed for every image, in configuration order.
    pub thumbor_paths: Vec<String>,
    pub download_max_attempts: u32,
    pub download_backoff: Duration,
    pub warmup_max_attempts: u32,
    pub http_client_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            http_address: env::var("HTTP_ADDRESS").unwrap_or_else(|_| HTTP_ADDRESS.to_string()),
            base_dir: PathBuf::from(env::var("BASE_DIR").unwrap_or_else(|_| BASE_DIR.to_string())),
            source_endpoint: env::var("SOURCE_ENDPOINT").ok().filter(|s| !s.is_empty()),
            image_buckets: csv_set(&env::var("IMAGE_BUCKETS").unwrap_or_default()),
            video_buckets: csv_set(&env::var("VIDEO_BUCKETS").unwrap_or_default()),
            thumbor_url: env::var("THUMBOR_URL").ok().filter(|s| !s.is_empty()),
            thumbor_key: env::var("THUMBOR_KEY").ok().filter(|s| !s.is_empty()),
            thumbor_paths: csv_list(&env::var("THUMBOR_PATHS").unwrap_or_default()),
            download_max_attempts: env::var("DOWNLOAD_MAX_ATTEMPTS")
                .unwrap_or_else(|_| DOWNLOAD_MAX_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(DOWNLOAD_MAX_ATTEMPTS),
            download_backoff: Duration::from_secs(
                env::var("DOWNLOAD_BACKOFF_SECS")
                    .unwrap_or_else(|_| DOWNLOAD_BACKOFF_SECS.to_string())
                    .parse()
                    .unwrap_or(DOWNLOAD_BACKOFF_SECS),
            ),
            warmup_max_attempts: env::var("WARMUP_MAX_ATTEMPTS")
                .unwrap_or_else(|_| WARMUP_MAX_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(WARMUP_MAX_ATTEMPTS),
            http_client_timeout: Duration::from_secs(
                env::var("HTTP_CLIENT_TIMEOUT_SECS")
                    .unwrap_or_else(|_| HTTP_CLIENT_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(HTTP_CLIENT_TIMEOUT_SECS),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let mut overlap: Vec<&str> = self
            .image_buckets
            .intersection(&self.video_buckets)
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            overlap.sort_unstable();
            return Err(anyhow::anyhow!(
                "IMAGE_BUCKETS and VIDEO_BUCKETS must be disjoint, both contain: {}",
                overlap.join(", ")
            ));
        }

        if !self.image_buckets.is_empty() {
            if self.thumbor_url.is_none() {
                return Err(anyhow::anyhow!(
                    "THUMBOR_URL must be set when IMAGE_BUCKETS is configured"
                ));
            }
            if self.thumbor_paths.is_empty() {
                return Err(anyhow::anyhow!(
                    "THUMBOR_PATHS must be set when IMAGE_BUCKETS is configured"
                ));
            }
        }

        if self.download_max_attempts == 0 || self.warmup_max_attempts == 0 {
            return Err(anyhow::anyhow!(
                "DOWNLOAD_MAX_ATTEMPTS and WARMUP_MAX_ATTEMPTS must be at least 1"
            ));
        }

        Ok(())
    }
}

fn csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn csv_set(raw: &str) -> HashSet<String> {
    csv_list(raw).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            http_address: HTTP_ADDRESS.to_string(),
            base_dir: PathBuf::from("/tmp"),
            source_endpoint: None,
            image_buckets: csv_set("images-prod,images-staging"),
            video_buckets: csv_set("videos-prod"),
            thumbor_url: Some("https://thumbor.example.com".to_string()),
            thumbor_key: None,
            thumbor_paths: vec!["300x200".to_string()],
            download_max_attempts: DOWNLOAD_MAX_ATTEMPTS,
            download_backoff: Duration::from_secs(DOWNLOAD_BACKOFF_SECS),
            warmup_max_attempts: WARMUP_MAX_ATTEMPTS,
            http_client_timeout: Duration::from_secs(HTTP_CLIENT_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_overlapping_bucket_sets_rejected() {
        let mut config = valid_config();
        config.video_buckets.insert("images-prod".to_string());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("disjoint"));
        assert!(err.contains("images-prod"));
    }

    #[test]
    fn test_image_buckets_require_thumbor_url() {
        let mut config = valid_config();
        config.thumbor_url = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_image_buckets_require_transformation_paths() {
        let mut config = valid_config();
        config.thumbor_paths.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_video_only_deployment_needs_no_thumbor() {
        let mut config = valid_config();
        config.image_buckets.clear();
        config.thumbor_url = None;
        config.thumbor_paths.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_csv_parsing_trims_and_drops_empty() {
        let set = csv_set(" a, b ,,c ");
        assert_eq!(set.len(), 3);
        assert!(set.contains("a"));
        assert!(set.contains("b"));
        assert!(set.contains("c"));
        assert!(csv_list("").is_empty());
    }
}
