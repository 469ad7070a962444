//! Cache Module
//!
//! Per-category TTL caching of remote responses with idle eviction, a capacity
//! bound, retry with backoff and single-flight fetching.

mod entry;
mod lru;
mod orchestrator;
mod policy;
mod retry;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CacheKey};
pub use lru::LruTracker;
pub use orchestrator::CacheOrchestrator;
pub use policy::{CachePolicy, Category};
pub use retry::RetryPolicy;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
