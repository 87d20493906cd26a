//! Error types module
//!
//! Application-level errors surfaced through the HTTP API. Lane-internal
//! failures (download, cache warm-up) have their own error types in the
//! mirror and warmer crates and never reach the HTTP caller.

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no processing lane configured for bucket: {0}")]
    UnknownBucket(String),

    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}
