//! Tarkov Gateway server binary
//!
//! Serves the data-access operations to UI collaborators over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tarkov_gateway::api::{create_router, AppState};
use tarkov_gateway::client::HttpTransport;
use tarkov_gateway::config::Config;
use tarkov_gateway::tasks::spawn_sweep_task;

/// Main entry point for the Tarkov Gateway server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Build the transport, rate limiter, cache and service
/// 4. Start background idle sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tarkov_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tarkov Gateway");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    info!(
        "Configuration loaded: endpoint={}, rate_limit={}@{}/s, max_entries={}, port={}, sweep_interval={}s",
        config.api_endpoint,
        config.rate_limit_capacity,
        config.rate_limit_refill_per_sec,
        config.cache_max_entries,
        config.server_port,
        config.sweep_interval
    );

    let transport = HttpTransport::new(config.api_endpoint.clone(), config.request_timeout())
        .context("Failed to build HTTP transport")?;
    let state = AppState::from_config(&config, Arc::new(transport))
        .context("Failed to initialize gateway state")?;
    info!("Rate limiter and cache initialized");

    let sweep_handle = spawn_sweep_task(state.service.cache().clone(), config.sweep_interval);
    info!("Background idle sweep task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    sweep_handle.abort();
    warn!("Idle sweep task aborted");
}
