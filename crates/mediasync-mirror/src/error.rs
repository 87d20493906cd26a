use thiserror::Error;

/// Mirror operation errors
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Origin returned status {0}")]
    OriginStatus(reqwest::StatusCode),

    #[error("Origin kept rate-limiting, gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for mirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;
