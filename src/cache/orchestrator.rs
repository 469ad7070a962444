//! Cache Orchestrator Module
//!
//! Owns one entry per logical request key. Fresh entries are served directly;
//! misses and stale entries go through the retry policy to the fetch function.
//! Concurrent requests for the same key share a single in-flight fetch, and an
//! in-flight fetch can be cancelled. Fetches run as their own tasks, so a
//! caller that goes away mid-fetch leaves the fetch running to completion.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt, Shared};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{
    CacheKey, CacheStats, CacheStore, Category, Lookup, RetryPolicy,
};
use crate::error::{ClassifiedError, Result};

type SharedFetch = Shared<BoxFuture<'static, Result<Value>>>;

struct InFlight {
    id: u64,
    fetch: SharedFetch,
    abort: AbortHandle,
}

// == Cache Orchestrator ==
/// Cheap to clone; clones share the same entries and in-flight table.
#[derive(Clone)]
pub struct CacheOrchestrator {
    store: Arc<RwLock<CacheStore>>,
    in_flight: Arc<Mutex<HashMap<CacheKey, InFlight>>>,
    retries: HashMap<Category, RetryPolicy>,
    default_retry: RetryPolicy,
    next_flight_id: Arc<AtomicU64>,
}

impl CacheOrchestrator {
    // == Constructor ==
    /// Wraps `store`, using `retry` for every category without an override.
    pub fn new(store: CacheStore, retry: RetryPolicy) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            retries: HashMap::new(),
            default_retry: retry,
            next_flight_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Overrides the retry policy for one category.
    pub fn with_retry(mut self, category: Category, retry: RetryPolicy) -> Self {
        self.retries.insert(category, retry);
        self
    }

    pub fn retry_policy(&self, category: Category) -> RetryPolicy {
        self.retries
            .get(&category)
            .copied()
            .unwrap_or(self.default_retry)
    }

    // == Get ==
    /// Returns the value for `key`, fetching it when absent or stale.
    ///
    /// A failed fetch leaves any existing entry untouched and returns the
    /// classified error. Callers arriving while a fetch for the same key is
    /// running wait for that fetch instead of starting another.
    pub async fn get<F, Fut>(&self, key: CacheKey, category: Category, fetch: F) -> Result<Value>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let flight = {
            let mut store = self.store.write().await;
            let mut flights = self.in_flight.lock().await;
            let busy = flights.contains_key(&key);

            if let Lookup::Fresh(value) = store.lookup(&key, Instant::now(), busy) {
                debug!(key = %key, "Cache hit");
                return Ok(value);
            }

            match flights.get(&key) {
                Some(existing) => {
                    store.stats_mut().record_coalesced();
                    debug!(key = %key, "Joining fetch already in flight");
                    existing.fetch.clone()
                }
                None => {
                    store.stats_mut().record_fetch();
                    debug!(key = %key, category = %category, "Cache miss, fetching");
                    let flight = self.launch(key.clone(), category, fetch);
                    let shared = flight.fetch.clone();
                    flights.insert(key, flight);
                    shared
                }
            }
        };

        flight.await
    }

    fn launch<F, Fut>(&self, key: CacheKey, category: Category, fetch: F) -> InFlight
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let id = self.next_flight_id.fetch_add(1, Ordering::Relaxed);
        let policy = category.policy();
        let retry = self.retry_policy(category);
        let store = Arc::clone(&self.store);
        let in_flight = Arc::clone(&self.in_flight);

        let work = async move {
            let outcome = retry.run(&key, &fetch).await;

            let mut store = store.write().await;
            let mut flights = in_flight.lock().await;

            match &outcome {
                Ok(value) => {
                    store.upsert(
                        key.clone(),
                        value.clone(),
                        category,
                        policy,
                        Instant::now(),
                        |other| other != &key && flights.contains_key(other),
                    );
                    debug!(key = %key, "Stored fresh result");
                }
                Err(err) => {
                    store.stats_mut().record_fetch_failure();
                    warn!(key = %key, kind = %err.kind(), "Fetch failed, cache left untouched");
                }
            }

            if flights.get(&key).is_some_and(|flight| flight.id == id) {
                flights.remove(&key);
            }
            outcome
        };

        let (abort, registration) = AbortHandle::new_pair();
        let fetch = tokio::spawn(Abortable::new(work, registration))
            .map(|joined| match joined {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(_aborted)) => Err(ClassifiedError::cancelled()),
                Err(e) => Err(ClassifiedError::unknown(format!("Fetch task failed: {}", e))),
            })
            .boxed()
            .shared();

        InFlight { id, fetch, abort }
    }

    // == Cancel ==
    /// Aborts the in-flight fetch for `key`.
    ///
    /// Every caller waiting on it receives a cancellation error and the cache
    /// is not written. Returns whether a fetch was running.
    pub async fn cancel(&self, key: &CacheKey) -> bool {
        let flight = self.in_flight.lock().await.remove(key);
        match flight {
            Some(flight) => {
                flight.abort.abort();
                info!(key = %key, "Cancelled in-flight fetch");
                true
            }
            None => false,
        }
    }

    // == Invalidate ==
    /// Drops the cached entry for `key` so the next `get` refetches.
    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        self.store.write().await.invalidate(key)
    }

    // == Sweep ==
    /// Removes idle entries, skipping keys with a fetch in flight.
    pub async fn sweep_idle(&self) -> usize {
        let mut store = self.store.write().await;
        let flights = self.in_flight.lock().await;
        store.evict_idle(Instant::now(), |key| flights.contains_key(key))
    }

    // == Inspection ==
    /// Cached value for `key` regardless of freshness, without counting an
    /// access.
    pub async fn peek(&self, key: &CacheKey) -> Option<Value> {
        self.store
            .read()
            .await
            .entry(key)
            .map(|entry| entry.value.clone())
    }

    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let flights = self.in_flight.lock().await;
        let mut stats = store.stats();
        stats.in_flight = flights.len();
        stats
    }
}
