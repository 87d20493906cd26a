//! Image-cache warm-up.
//!
//! Issues signed requests to a thumbor-compatible transformation cache for
//! each configured transformation path, polling until the cache reports a
//! hit, so the first real user request is already served from cache.

mod signer;
mod warmer;

pub use signer::access_token;
pub use warmer::{CacheWarmer, WarmError};
