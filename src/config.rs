//! Configuration Module
//!
//! Handles loading deployment configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::RetryPolicy;
use crate::error::ConfigError;

/// Default remote endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.tarkov.dev/graphql";

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote GraphQL endpoint
    pub api_endpoint: String,
    /// Token bucket capacity
    pub rate_limit_capacity: f64,
    /// Token bucket refill rate in tokens per second
    pub rate_limit_refill_per_sec: f64,
    /// Retries after the first attempt for network failures
    pub retry_max_retries: u32,
    /// Base backoff delay in milliseconds
    pub retry_base_delay_ms: u64,
    /// Backoff cap in milliseconds
    pub retry_max_delay_ms: u64,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum number of cached responses
    pub cache_max_entries: usize,
    /// Idle sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TARKOV_API_ENDPOINT` - Remote endpoint (default: https://api.tarkov.dev/graphql)
    /// - `RATE_LIMIT_CAPACITY` - Token bucket capacity (default: 100)
    /// - `RATE_LIMIT_REFILL_PER_SEC` - Refill rate (default: 10)
    /// - `RETRY_MAX_RETRIES` - Network retries (default: 3)
    /// - `RETRY_BASE_DELAY_MS` - Backoff base (default: 1000)
    /// - `RETRY_MAX_DELAY_MS` - Backoff cap (default: 30000)
    /// - `REQUEST_TIMEOUT_MS` - Request timeout (default: 15000)
    /// - `CACHE_MAX_ENTRIES` - Cache capacity (default: 1000)
    /// - `SWEEP_INTERVAL` - Idle sweep frequency in seconds (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_endpoint: env::var("TARKOV_API_ENDPOINT").unwrap_or(defaults.api_endpoint),
            rate_limit_capacity: env_or("RATE_LIMIT_CAPACITY", defaults.rate_limit_capacity),
            rate_limit_refill_per_sec: env_or(
                "RATE_LIMIT_REFILL_PER_SEC",
                defaults.rate_limit_refill_per_sec,
            ),
            retry_max_retries: env_or("RETRY_MAX_RETRIES", defaults.retry_max_retries),
            retry_base_delay_ms: env_or("RETRY_BASE_DELAY_MS", defaults.retry_base_delay_ms),
            retry_max_delay_ms: env_or("RETRY_MAX_DELAY_MS", defaults.retry_max_delay_ms),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Rejects values the components cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rate_limit_capacity.is_finite() && self.rate_limit_capacity > 0.0) {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_CAPACITY",
                "must be a positive number",
            ));
        }
        if !(self.rate_limit_refill_per_sec.is_finite() && self.rate_limit_refill_per_sec > 0.0) {
            return Err(ConfigError::invalid(
                "RATE_LIMIT_REFILL_PER_SEC",
                "must be a positive number",
            ));
        }
        if self.retry_base_delay_ms > self.retry_max_delay_ms {
            return Err(ConfigError::invalid(
                "RETRY_BASE_DELAY_MS",
                "must not exceed RETRY_MAX_DELAY_MS",
            ));
        }
        if self.cache_max_entries == 0 {
            return Err(ConfigError::invalid("CACHE_MAX_ENTRIES", "must be at least 1"));
        }
        if self.sweep_interval == 0 {
            return Err(ConfigError::invalid("SWEEP_INTERVAL", "must be at least 1"));
        }
        Ok(())
    }

    /// Retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry_max_retries,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            rate_limit_capacity: 100.0,
            rate_limit_refill_per_sec: 10.0,
            retry_max_retries: 3,
            retry_base_delay_ms: 1000,
            retry_max_delay_ms: 30_000,
            request_timeout_ms: 15_000,
            cache_max_entries: 1000,
            sweep_interval: 30,
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
