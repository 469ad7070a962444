//! Retry Policy Module
//!
//! Capped exponential backoff, applied only to network failures.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{ClassifiedError, ErrorKind, Result};

// == Retry Policy ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each following retry
    pub base_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    // == Backoff ==
    /// `min(base * 2^attempt, max)`, with the attempt counter starting at 0.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    // == Decision ==
    /// Delay before the next attempt, or `None` when `error` must surface.
    ///
    /// Only network failures are retried; rate-limit, protocol and unknown
    /// failures surface on first occurrence.
    pub fn next_delay(&self, error: &ClassifiedError, retries_so_far: u32) -> Option<Duration> {
        match error.kind() {
            ErrorKind::Network if retries_so_far < self.max_retries => {
                Some(self.delay_for(retries_so_far))
            }
            ErrorKind::Network
            | ErrorKind::RateLimited
            | ErrorKind::Protocol
            | ErrorKind::Unknown => None,
        }
    }

    // == Run ==
    /// Runs `operation` until it succeeds or the policy gives up, returning
    /// the last error in the latter case.
    pub async fn run<T, F, Fut>(&self, label: &impl Display, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retries = 0;

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            let Some(delay) = self.next_delay(&err, retries) else {
                return Err(err);
            };

            retries += 1;
            warn!(
                key = %label,
                retry = retries,
                max_retries = self.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Network failure, backing off before retry"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
