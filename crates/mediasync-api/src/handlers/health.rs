//! Health check handlers.

/// Liveness probe - process is running.
pub async fn ping() -> &'static str {
    "pong"
}
