//! Domain records returned by the Tarkov API
//!
//! Field names follow the remote schema (camelCase on the wire). Anything the
//! service may omit is optional or defaulted.

use serde::{Deserialize, Serialize};

// == Items ==
/// A tradeable item with its flea market summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_link: Option<String>,
    /// 24 hour average flea price, absent for items not sold on the flea
    #[serde(default)]
    pub avg24h_price: Option<i64>,
    #[serde(default)]
    pub base_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buy_for: Vec<ItemPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sell_for: Vec<ItemPrice>,
}

impl Item {
    /// Average price used for ranking; items without one rank as 0.
    pub fn price_or_zero(&self) -> i64 {
        self.avg24h_price.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPrice {
    pub vendor: Vendor,
    pub price: i64,
    pub currency: String,
    #[serde(rename = "priceRUB")]
    pub price_rub: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub name: String,
    pub normalized_name: String,
}

// == Ammo ==
/// An ammunition item with its ballistic properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ammo {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default)]
    pub properties: Option<AmmoProperties>,
}

impl Ammo {
    pub fn penetration_power(&self) -> i64 {
        self.properties
            .as_ref()
            .and_then(|p| p.penetration_power)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmmoProperties {
    #[serde(default)]
    pub damage: Option<i64>,
    #[serde(default)]
    pub penetration_power: Option<i64>,
    #[serde(default)]
    pub armor_damage: Option<i64>,
    #[serde(default)]
    pub fragmentation_chance: Option<f64>,
    #[serde(default)]
    pub ricochet_chance: Option<f64>,
    #[serde(default)]
    pub initial_speed: Option<f64>,
    #[serde(default)]
    pub caliber: Option<String>,
}

// == Maps ==
/// A playable location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMap {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub raid_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<String>,
    #[serde(default)]
    pub min_player_level: Option<u32>,
    #[serde(default)]
    pub max_player_level: Option<u32>,
    #[serde(default)]
    pub bosses: Vec<BossSpawn>,
    #[serde(default)]
    pub extracts: Vec<MapExtract>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_keys: Vec<AccessKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_keys_min_player_level: Option<u32>,
}

/// One boss's spawn configuration on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossSpawn {
    pub boss: MobInfo,
    pub spawn_chance: f64,
    #[serde(default)]
    pub spawn_locations: Vec<SpawnLocation>,
    #[serde(default)]
    pub escorts: Vec<BossEscort>,
    #[serde(default)]
    pub spawn_time: Option<i64>,
    #[serde(default)]
    pub spawn_time_random: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_trigger: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub normalized_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_portrait_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_poster_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub health: Vec<BodyPartHealth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPartHealth {
    pub body_part: String,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnLocation {
    pub name: String,
    pub chance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossEscort {
    pub boss: MobInfo,
    #[serde(default)]
    pub amount: Vec<EscortAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscortAmount {
    pub count: u32,
    pub chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExtract {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_link: Option<String>,
}

// == Boss Aggregation ==
/// A map with just the boss spawn records, as returned by the boss query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bosses: Vec<BossSpawn>,
}

/// One boss merged across every map it spawns on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossSummary {
    pub id: String,
    pub name: String,
    /// Highest spawn chance seen on any map
    pub spawn_rate: f64,
    /// Map names in first-seen order; repeats are kept
    pub maps: Vec<String>,
}
