//! Rate Limiter Module
//!
//! Token-bucket admission gate placed in front of every remote call.

use std::sync::{Mutex, MutexGuard};

use tokio::time::Instant;

use crate::error::ConfigError;

// == Bucket State ==
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        self.last_refill = now;
    }
}

// == Rate Limiter ==
/// Token bucket shared by every caller of the API client.
///
/// Refill and decrement happen under one lock, so two near-simultaneous
/// callers can never both be admitted on the same token.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a full bucket.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of tokens
    /// * `refill_per_sec` - Tokens added per second
    pub fn new(capacity: f64, refill_per_sec: f64) -> Result<Self, ConfigError> {
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(ConfigError::invalid("capacity", "must be a positive number"));
        }
        if !(refill_per_sec.is_finite() && refill_per_sec > 0.0) {
            return Err(ConfigError::invalid(
                "refill_per_sec",
                "must be a positive number",
            ));
        }

        Ok(Self {
            bucket: Mutex::new(TokenBucket {
                capacity,
                tokens: capacity,
                refill_per_sec,
                last_refill: Instant::now(),
            }),
        })
    }

    // == Try Acquire ==
    /// Admits one request if a whole token is available.
    ///
    /// Never waits: a rejected caller must treat the rejection as an
    /// immediate failure.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub(crate) fn try_acquire_at(&self, now: Instant) -> bool {
        let mut bucket = self.lock();
        bucket.refill(now);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    // == Available Tokens ==
    /// Returns the token count after refilling up to now.
    pub fn available_tokens(&self) -> f64 {
        self.available_tokens_at(Instant::now())
    }

    pub(crate) fn available_tokens_at(&self, now: Instant) -> f64 {
        let mut bucket = self.lock();
        bucket.refill(now);
        bucket.tokens
    }

    pub fn capacity(&self) -> f64 {
        self.lock().capacity
    }

    fn lock(&self) -> MutexGuard<'_, TokenBucket> {
        // A poisoned bucket is still consistent
        self.bucket
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
