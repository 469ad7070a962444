//! Cache Store Module
//!
//! Entry table combining freshness checks, idle eviction and an LRU capacity
//! bound. Every method takes the current instant so callers control the clock.

use std::collections::HashMap;

use serde_json::Value;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheKey, CachePolicy, CacheStats, Category, LruTracker};

// == Lookup Result ==
/// Outcome of reading a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A fresh value, served without refetching
    Fresh(Value),
    /// An entry exists but its freshness window has passed
    Stale,
    /// No entry for the key
    Missing,
}

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<CacheKey, CacheEntry>,
    lru: LruTracker<CacheKey>,
    stats: CacheStats,
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Lookup ==
    /// Reads `key`, recording a hit or a miss.
    ///
    /// An idle entry found here is removed on the spot unless `in_flight` says
    /// a fetch for the key is running. Any surviving entry counts as accessed.
    pub fn lookup(&mut self, key: &CacheKey, now: Instant, in_flight: bool) -> Lookup {
        let idle = match self.entries.get(key) {
            Some(entry) => entry.is_idle(now) && !in_flight,
            None => {
                self.stats.record_miss();
                return Lookup::Missing;
            }
        };

        if idle {
            self.remove(key);
            self.stats.record_idle_evictions(1);
            self.stats.record_miss();
            return Lookup::Missing;
        }

        self.lru.touch(key);
        let Some(entry) = self.entries.get_mut(key) else {
            return Lookup::Missing;
        };
        entry.touch(now);

        if entry.is_fresh(now) {
            self.stats.record_hit();
            Lookup::Fresh(entry.value.clone())
        } else {
            self.stats.record_miss();
            Lookup::Stale
        }
    }

    // == Upsert ==
    /// Stores a freshly fetched value for `key`.
    ///
    /// A new key beyond capacity evicts the least recently used entry that
    /// `pinned` does not protect. When every other entry is pinned the store
    /// grows past capacity until the next insert.
    pub fn upsert<F>(
        &mut self,
        key: CacheKey,
        value: Value,
        category: Category,
        policy: CachePolicy,
        now: Instant,
        pinned: F,
    ) where
        F: Fn(&CacheKey) -> bool,
    {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, category, policy, now);
            self.lru.touch(&key);
            return;
        }

        while self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest_where(|k| !pinned(k)) {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_capacity_eviction();
                }
                None => break,
            }
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(value, category, policy, now));
        self.lru.touch(&key);
    }

    // == Invalidate ==
    /// Drops the entry for `key`. Returns whether one existed.
    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.remove(key)
    }

    // == Evict Idle ==
    /// Removes every idle entry that `pinned` does not protect.
    ///
    /// Returns the number of entries removed.
    pub fn evict_idle<F>(&mut self, now: Instant, pinned: F) -> usize
    where
        F: Fn(&CacheKey) -> bool,
    {
        let idle_keys: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(key, entry)| entry.is_idle(now) && !pinned(key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &idle_keys {
            self.remove(key);
        }

        self.stats.record_idle_evictions(idle_keys.len());
        idle_keys.len()
    }

    pub fn entry(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn remove(&mut self, key: &CacheKey) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}
