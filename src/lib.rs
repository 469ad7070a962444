//! Tarkov Gateway - a rate-limited, caching data-access layer for the Tarkov API
//!
//! Gates outbound requests with a token bucket, caches responses per category
//! with idle eviction, retries network failures with backoff and aggregates
//! boss spawns across maps.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{ClassifiedError, ErrorKind};
pub use service::TarkovService;
pub use tasks::spawn_sweep_task;
