//! Shared configuration, data model, and retry policy for the mediasync
//! agent.

pub mod config;
pub mod error;
pub mod models;
pub mod retry;

pub use config::Config;
pub use error::AppError;
pub use models::{FileRef, ProcessingLane};
pub use retry::{Attempt, RetryError, RetryPolicy};
