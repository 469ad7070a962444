//! Cache Entry Module
//!
//! Defines cache keys and the per-key entry with freshness and idle tracking.

use std::fmt;
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::time::Instant;

use crate::cache::policy::{CachePolicy, Category};

// == Cache Key ==
/// Logical request identity: operation name plus canonical parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: String,
    params: String,
}

impl CacheKey {
    /// Builds a key from an operation identifier and its parameters.
    ///
    /// Parameter objects are encoded with their keys sorted at every level, so
    /// the same parameters always produce the same key.
    pub fn new(operation: impl Into<String>, params: &Value) -> Self {
        Self {
            operation: operation.into(),
            params: canonicalize(params).to_string(),
        }
    }

    /// Key for an operation without parameters.
    pub fn bare(operation: impl Into<String>) -> Self {
        Self::new(operation, &Value::Null)
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &str {
        &self.params
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation, self.params)
    }
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

// == Cache Entry ==
/// The last successful result for one key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Opaque result payload
    pub value: Value,
    /// Category the entry was stored under
    pub category: Category,
    /// Windows applied to this entry
    pub policy: CachePolicy,
    /// When the value was fetched
    pub fetched_at: Instant,
    /// Last time a caller read or refreshed the entry
    pub last_accessed: Instant,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: Value, category: Category, policy: CachePolicy, now: Instant) -> Self {
        Self {
            value,
            category,
            policy,
            fetched_at: now,
            last_accessed: now,
        }
    }

    // == Freshness ==
    /// An entry is fresh while strictly less than its freshness window has
    /// elapsed since the fetch.
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.age(now) < self.policy.freshness
    }

    /// Time left before the entry goes stale, zero once stale.
    pub fn freshness_remaining(&self, now: Instant) -> Duration {
        self.policy.freshness.saturating_sub(self.age(now))
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    // == Idle Eviction ==
    /// True once the entry has gone unused for longer than its idle window.
    pub fn is_idle(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_accessed) > self.policy.idle_eviction
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_accessed = now;
    }

    // == Refresh ==
    /// Replaces the value after a successful re-fetch.
    pub fn refresh(&mut self, value: Value, category: Category, policy: CachePolicy, now: Instant) {
        self.value = value;
        self.category = category;
        self.policy = policy;
        self.fetched_at = now;
        self.last_accessed = now;
    }
}
