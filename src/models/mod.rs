//! Domain records, query documents and response bodies
//!
//! Records deserialize from the remote service's camelCase JSON; the response
//! DTOs shape the gateway's own endpoints.

pub mod queries;
pub mod responses;
pub mod tarkov;

// Re-export commonly used types
pub use queries::{AmmoQuery, MapsQuery, HIGH_VALUE_ITEM_NAMES};
pub use responses::{HealthResponse, StatsResponse};
pub use tarkov::{
    AccessKey, Ammo, AmmoProperties, BodyPartHealth, BossEscort, BossSpawn, BossSummary,
    EscortAmount, GameMap, Item, ItemPrice, MapExtract, MapSummary, MobInfo, SpawnLocation,
    Vendor,
};
