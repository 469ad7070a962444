//! Cache Statistics Module
//!
//! Counters for cache hits, fetches and evictions.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups that found no entry or a stale one
    pub misses: u64,
    /// Fetch cycles started (one per single-flight leader)
    pub fetches: u64,
    /// Fetch cycles that ended in an error
    pub fetch_failures: u64,
    /// Callers that joined a fetch already in flight
    pub coalesced: u64,
    /// Entries removed after sitting idle past their window
    pub idle_evictions: u64,
    /// Entries removed to stay within capacity
    pub capacity_evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Fetches currently in flight
    pub in_flight: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was looked up yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn record_idle_evictions(&mut self, count: usize) {
        self.idle_evictions += count as u64;
    }

    pub fn record_capacity_eviction(&mut self) {
        self.capacity_evictions += 1;
    }
}
