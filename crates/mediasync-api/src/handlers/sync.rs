//! Sync event handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use mediasync_core::FileRef;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Accept an object-created event and launch its processing lane.
///
/// Acceptance is fire-and-forget: the lane runs as a detached task and its
/// outcome never reaches this caller. An unclassifiable bucket is the only
/// synchronous rejection besides a malformed body.
pub async fn sync(
    State(state): State<Arc<AppState>>,
    ValidatedJson(file): ValidatedJson<FileRef>,
) -> Result<StatusCode, HttpAppError> {
    tracing::info!(
        region = %file.region,
        bucket = %file.bucket,
        key = %file.key,
        "Sync event received"
    );

    // Detached: the lane owns its retry loop and logs its own outcome.
    let _task = state.dispatcher.dispatch(file)?;

    Ok(StatusCode::OK)
}
