//! Bounded retry with fixed backoff and early success.
//!
//! The downloader (rate-limit backoff) and the cache warmer (zero-backoff
//! polling) implement the same shape of bounded-retry-with-early-success;
//! both are driven by [`RetryPolicy`]. Each caller decides what counts as
//! transient for its domain.

use std::future::Future;
use std::time::Duration;

/// Outcome of a single attempt inside a [`RetryPolicy::run`] loop.
pub enum Attempt<T, E> {
    /// The operation finished; stop retrying.
    Done(T),
    /// Transient failure; run another attempt if budget remains.
    Retry,
    /// Unrecoverable failure; stop immediately.
    Fail(E),
}

/// Terminal error of a [`RetryPolicy::run`] loop.
#[derive(Debug, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Every attempt was transient and the budget is spent.
    Exhausted { attempts: u32 },
    /// An attempt failed unrecoverably.
    Fatal(E),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Run `op` until it reports `Done`/`Fail` or the attempt budget is
    /// spent. Attempts are numbered from 1; backoff is skipped after the
    /// final attempt.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T, E>>,
    {
        for attempt in 1..=self.max_attempts {
            match op(attempt).await {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(err) => return Err(RetryError::Fatal(err)),
                Attempt::Retry => {
                    if attempt < self.max_attempts && !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
            }
        }

        Err(RetryError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
