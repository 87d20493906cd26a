//! Mediasync HTTP API
//!
//! Receives object-created events on `/sync`, classifies them into a
//! processing lane (mirror for video, cache warm-up for image), and runs
//! the lane as a detached background task. The caller only ever observes
//! acceptance; lane outcomes are visible through logging.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
