//! Local mirroring of remote objects.
//!
//! Fetches an object identified by a [`mediasync_core::FileRef`] and
//! materializes it under a base directory with a temp-file-then-rename
//! pattern, so a concurrent reader never observes a partially written file
//! at the final path.

mod downloader;
mod error;

pub use downloader::Downloader;
pub use error::{MirrorError, MirrorResult};
