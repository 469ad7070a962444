//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    ammo_handler, bosses_handler, health_handler, high_value_items_handler, map_bosses_handler,
    map_handler, maps_handler, stats_handler, top_ammo_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /ammo` - Ammo page (`limit`, `offset`, `lang`)
/// - `GET /ammo/top` - Highest penetration rounds (`limit`)
/// - `GET /maps` - All maps (`lang`)
/// - `GET /maps/:id` - One map (`lang`)
/// - `GET /maps/:id/bosses` - Boss roster of one map (`lang`)
/// - `GET /bosses` - Bosses merged across maps
/// - `GET /items/high-value` - Curated high-value items
/// - `GET /stats` - Cache and rate limiter statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin for the UI
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ammo", get(ammo_handler))
        .route("/ammo/top", get(top_ammo_handler))
        .route("/maps", get(maps_handler))
        .route("/maps/:id", get(map_handler))
        .route("/maps/:id/bosses", get(map_bosses_handler))
        .route("/bosses", get(bosses_handler))
        .route("/items/high-value", get(high_value_items_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
