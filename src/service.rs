//! Tarkov Service
//!
//! The operations offered to callers. Each one maps to a cache key and a
//! category; the fetch behind it goes through the rate-limited API client and,
//! for derived views, through the aggregation functions before it is cached.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::aggregate::{map_boss_roster, merge_boss_spawns, rank_high_value_items, top_ammo};
use crate::cache::{CacheKey, CacheOrchestrator, Category};
use crate::client::ApiClient;
use crate::error::{ClassifiedError, Result};
use crate::models::queries::{
    AMMO_ITEMS_QUERY, BOSSES_QUERY, DEFAULT_LANG, HIGH_VALUE_ITEMS_QUERY, MAPS_QUERY,
    MAP_BY_ID_QUERY,
};
use crate::models::{
    Ammo, AmmoQuery, BossSpawn, BossSummary, GameMap, Item, MapSummary, MapsQuery,
    HIGH_VALUE_ITEM_NAMES,
};

// == Tarkov Service ==
#[derive(Clone)]
pub struct TarkovService {
    client: ApiClient,
    cache: CacheOrchestrator,
}

impl TarkovService {
    pub fn new(client: ApiClient, cache: CacheOrchestrator) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &CacheOrchestrator {
        &self.cache
    }

    // == Ammo ==
    /// One page of ammunition.
    pub async fn fetch_ammo(&self, query: AmmoQuery) -> Result<Vec<Ammo>> {
        let variables = encode(&query)?;
        let key = ammo_key(&variables);
        let client = self.client.clone();

        let value = self
            .cache
            .get(key, Category::Ammo, move || {
                let client = client.clone();
                let variables = variables.clone();
                async move {
                    let data = client.fetch(AMMO_ITEMS_QUERY, Some(variables)).await?;
                    Ok::<_, ClassifiedError>(list_field(data, "items"))
                }
            })
            .await?;

        decode(value)
    }

    /// The `limit` rounds with the highest penetration across all ammunition.
    pub async fn fetch_top_ammo(&self, limit: u32) -> Result<Vec<Ammo>> {
        let key = top_ammo_key(limit);
        let client = self.client.clone();

        let value = self
            .cache
            .get(key, Category::TopAmmo, move || {
                let client = client.clone();
                async move {
                    let variables = json!({ "lang": DEFAULT_LANG });
                    let data = client.fetch(AMMO_ITEMS_QUERY, Some(variables)).await?;
                    let ammo: Vec<Ammo> = decode(list_field(data, "items"))?;
                    encode(&top_ammo(ammo, limit as usize))
                }
            })
            .await?;

        decode(value)
    }

    // == Maps ==
    pub async fn fetch_maps(&self, query: MapsQuery) -> Result<Vec<GameMap>> {
        let variables = encode(&query)?;
        let key = maps_key(&variables);
        let client = self.client.clone();

        let value = self
            .cache
            .get(key, Category::Maps, move || {
                let client = client.clone();
                let variables = variables.clone();
                async move {
                    let data = client.fetch(MAPS_QUERY, Some(variables)).await?;
                    Ok::<_, ClassifiedError>(list_field(data, "maps"))
                }
            })
            .await?;

        decode(value)
    }

    /// Full details of one map. A map the service does not know is a
    /// protocol error and is not cached.
    pub async fn fetch_map_by_id(&self, id: &str, query: MapsQuery) -> Result<GameMap> {
        let variables = map_variables(id, &query);
        let key = map_key(&variables);
        let client = self.client.clone();
        let id = id.to_owned();

        let value = self
            .cache
            .get(key, Category::MapDetail, move || {
                let client = client.clone();
                let variables = variables.clone();
                let id = id.clone();
                async move {
                    let data = client.fetch(MAP_BY_ID_QUERY, Some(variables)).await?;
                    match take_field(data, "map") {
                        Value::Null => Err(ClassifiedError::protocol(format!(
                            "Map with ID {} not found",
                            id
                        ))),
                        map => Ok(map),
                    }
                }
            })
            .await?;

        decode(value)
    }

    /// Bosses of one map, generic factions removed, highest spawn chance first.
    pub async fn fetch_map_bosses(&self, id: &str, query: MapsQuery) -> Result<Vec<BossSpawn>> {
        let map = self.fetch_map_by_id(id, query).await?;
        Ok(map_boss_roster(&map))
    }

    // == Bosses ==
    /// Every boss merged across all maps, highest spawn rate first.
    pub async fn fetch_boss_summary(&self) -> Result<Vec<BossSummary>> {
        let client = self.client.clone();

        let value = self
            .cache
            .get(boss_summary_key(), Category::BossAggregate, move || {
                let client = client.clone();
                async move {
                    let data = client.fetch(BOSSES_QUERY, None).await?;
                    let maps: Vec<MapSummary> = decode(list_field(data, "maps"))?;
                    let summaries = merge_boss_spawns(&maps);
                    debug!(maps = maps.len(), bosses = summaries.len(), "Merged boss spawns");
                    encode(&summaries)
                }
            })
            .await?;

        decode(value)
    }

    // == High-Value Items ==
    /// The curated high-value items, most expensive first.
    pub async fn fetch_high_value_items(&self) -> Result<Vec<Item>> {
        let variables = high_value_variables();
        let key = high_value_key(&variables);
        let client = self.client.clone();

        let value = self
            .cache
            .get(key, Category::HighValueItems, move || {
                let client = client.clone();
                let variables = variables.clone();
                async move {
                    let data = client.fetch(HIGH_VALUE_ITEMS_QUERY, Some(variables)).await?;
                    let items: Vec<Item> = decode(list_field(data, "items"))?;
                    encode(&rank_high_value_items(items))
                }
            })
            .await?;

        decode(value)
    }

    // == Cancellation ==
    // Each one aborts the running fetch behind the matching `fetch_*` call.
    // Every caller waiting on it gets a cancellation error and nothing is
    // cached. Returns whether a fetch was running.

    pub async fn cancel_ammo(&self, query: &AmmoQuery) -> Result<bool> {
        Ok(self.cache.cancel(&ammo_key(&encode(query)?)).await)
    }

    pub async fn cancel_top_ammo(&self, limit: u32) -> bool {
        self.cache.cancel(&top_ammo_key(limit)).await
    }

    pub async fn cancel_maps(&self, query: &MapsQuery) -> Result<bool> {
        Ok(self.cache.cancel(&maps_key(&encode(query)?)).await)
    }

    /// Also covers `fetch_map_bosses`, which reads through the same fetch.
    pub async fn cancel_map(&self, id: &str, query: &MapsQuery) -> bool {
        self.cache.cancel(&map_key(&map_variables(id, query))).await
    }

    pub async fn cancel_boss_summary(&self) -> bool {
        self.cache.cancel(&boss_summary_key()).await
    }

    pub async fn cancel_high_value_items(&self) -> bool {
        self.cache.cancel(&high_value_key(&high_value_variables())).await
    }
}

// == Cache Keys ==
fn ammo_key(variables: &Value) -> CacheKey {
    CacheKey::new("ammo", variables)
}

fn top_ammo_key(limit: u32) -> CacheKey {
    CacheKey::new("top_ammo", &json!({ "limit": limit }))
}

fn maps_key(variables: &Value) -> CacheKey {
    CacheKey::new("maps", variables)
}

fn map_variables(id: &str, query: &MapsQuery) -> Value {
    json!({ "id": id, "lang": query.lang })
}

fn map_key(variables: &Value) -> CacheKey {
    CacheKey::new("map", variables)
}

fn boss_summary_key() -> CacheKey {
    CacheKey::bare("bosses")
}

fn high_value_variables() -> Value {
    json!({ "names": HIGH_VALUE_ITEM_NAMES })
}

fn high_value_key(variables: &Value) -> CacheKey {
    CacheKey::new("high_value_items", variables)
}

// == Payload Helpers ==
fn take_field(mut data: Value, field: &str) -> Value {
    data.get_mut(field).map(Value::take).unwrap_or(Value::Null)
}

/// A list field of the payload; a missing or null list reads as empty.
fn list_field(data: Value, field: &str) -> Value {
    match take_field(data, field) {
        Value::Null => Value::Array(Vec::new()),
        list => list,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        ClassifiedError::unknown(format!("Unexpected response shape from Tarkov API: {}", e))
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| ClassifiedError::unknown(format!("Failed to encode result: {}", e)))
}
