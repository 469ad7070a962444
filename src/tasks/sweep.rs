//! Idle Sweep Task
//!
//! Background task that periodically evicts cache entries left idle past
//! their category's window.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheOrchestrator;

/// Spawns a background task that sweeps idle entries every `interval_secs`.
///
/// Keys with a fetch in flight are skipped. The returned handle is aborted on
/// shutdown.
pub fn spawn_sweep_task(cache: CacheOrchestrator, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!("Starting idle sweep task with interval of {} seconds", interval_secs);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_idle().await;
            if removed > 0 {
                info!("Idle sweep: removed {} entries", removed);
            } else {
                debug!("Idle sweep: no idle entries found");
            }
        }
    })
}
