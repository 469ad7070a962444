//! Response DTOs for the gateway API
//!
//! Bodies that are not domain records: health and stats.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cache counters
    pub cache: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Tokens currently left in the outbound rate limiter
    pub available_tokens: f64,
    pub token_capacity: f64,
}

impl StatsResponse {
    pub fn new(cache: CacheStats, available_tokens: f64, token_capacity: f64) -> Self {
        Self {
            hit_rate: cache.hit_rate(),
            cache,
            available_tokens,
            token_capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
