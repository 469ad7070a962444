//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint. Failures render through
//! `ClassifiedError`'s `IntoResponse`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::cache::{CacheOrchestrator, CacheStore};
use crate::client::{ApiClient, RateLimiter, Transport};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::models::queries::DEFAULT_AMMO_LIMIT;
use crate::models::{
    Ammo, AmmoQuery, BossSpawn, BossSummary, GameMap, HealthResponse, Item, MapsQuery,
    StatsResponse,
};
use crate::service::TarkovService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TarkovService,
}

impl AppState {
    pub fn new(service: TarkovService) -> Self {
        Self { service }
    }

    /// Wires the limiter, client and cache from configuration around
    /// `transport`.
    pub fn from_config(
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> std::result::Result<Self, ConfigError> {
        let limiter = RateLimiter::new(config.rate_limit_capacity, config.rate_limit_refill_per_sec)?;
        let client = ApiClient::new(Arc::new(limiter), transport);
        let cache = CacheOrchestrator::new(
            CacheStore::new(config.cache_max_entries),
            config.retry_policy(),
        );
        Ok(Self::new(TarkovService::new(client, cache)))
    }
}

/// Query string of GET /ammo/top
#[derive(Debug, Deserialize)]
pub struct TopAmmoParams {
    #[serde(default = "default_top_limit")]
    pub limit: u32,
}

fn default_top_limit() -> u32 {
    DEFAULT_AMMO_LIMIT
}

/// Handler for GET /ammo
pub async fn ammo_handler(
    State(state): State<AppState>,
    Query(query): Query<AmmoQuery>,
) -> Result<Json<Vec<Ammo>>> {
    Ok(Json(state.service.fetch_ammo(query).await?))
}

/// Handler for GET /ammo/top
pub async fn top_ammo_handler(
    State(state): State<AppState>,
    Query(params): Query<TopAmmoParams>,
) -> Result<Json<Vec<Ammo>>> {
    Ok(Json(state.service.fetch_top_ammo(params.limit).await?))
}

/// Handler for GET /maps
pub async fn maps_handler(
    State(state): State<AppState>,
    Query(query): Query<MapsQuery>,
) -> Result<Json<Vec<GameMap>>> {
    Ok(Json(state.service.fetch_maps(query).await?))
}

/// Handler for GET /maps/:id
pub async fn map_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MapsQuery>,
) -> Result<Json<GameMap>> {
    Ok(Json(state.service.fetch_map_by_id(&id, query).await?))
}

/// Handler for GET /maps/:id/bosses
pub async fn map_bosses_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MapsQuery>,
) -> Result<Json<Vec<BossSpawn>>> {
    Ok(Json(state.service.fetch_map_bosses(&id, query).await?))
}

/// Handler for GET /bosses
pub async fn bosses_handler(State(state): State<AppState>) -> Result<Json<Vec<BossSummary>>> {
    Ok(Json(state.service.fetch_boss_summary().await?))
}

/// Handler for GET /items/high-value
pub async fn high_value_items_handler(State(state): State<AppState>) -> Result<Json<Vec<Item>>> {
    Ok(Json(state.service.fetch_high_value_items().await?))
}

/// Handler for GET /stats
///
/// Returns cache counters and the limiter's remaining tokens.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache().stats().await;
    let limiter = state.service.client().limiter();

    Json(StatsResponse::new(
        cache,
        limiter.available_tokens(),
        limiter.capacity(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedTransport;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn state(transport: ScriptedTransport) -> AppState {
        AppState::from_config(&Config::default(), Arc::new(transport)).unwrap()
    }

    #[tokio::test]
    async fn test_from_config_rejects_bad_limiter() {
        let config = Config {
            rate_limit_capacity: 0.0,
            ..Config::default()
        };
        let transport: Arc<dyn Transport> = Arc::new(ScriptedTransport::data(json!({})));
        assert!(AppState::from_config(&config, transport).is_err());
    }

    #[tokio::test]
    async fn test_ammo_handler_defaults() {
        let state = state(ScriptedTransport::data(json!({
            "items": [{ "id": "a", "name": "PS" }]
        })));

        let Json(ammo) = ammo_handler(State(state), Query(AmmoQuery::default()))
            .await
            .unwrap();
        assert_eq!(ammo.len(), 1);
    }

    #[tokio::test]
    async fn test_map_handler_not_found() {
        let state = state(ScriptedTransport::data(json!({ "map": null })));

        let err = map_handler(
            State(state),
            Path("nope".to_string()),
            Query(MapsQuery::default()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = state(ScriptedTransport::data(json!({})));

        let Json(response) = stats_handler(State(state)).await;
        assert_eq!(response.cache.hits, 0);
        assert_eq!(response.cache.misses, 0);
        assert_eq!(response.token_capacity, 100.0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
