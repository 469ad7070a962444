//! Query documents and their variables
//!
//! The documents are sent verbatim; the remote service validates them.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_AMMO_LIMIT: u32 = 10;

/// Items tracked by the high-value view.
pub const HIGH_VALUE_ITEM_NAMES: [&str; 5] = [
    "Bitcoin",
    "LEDX Skin Transilluminator",
    "Moonshine",
    "TerraGroup Labs keycard (Red)",
    "TerraGroup Labs keycard (Green)",
];

// == Variables ==
/// Paging and language for the ammo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoQuery {
    #[serde(default = "default_ammo_limit")]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for AmmoQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_AMMO_LIMIT,
            offset: None,
            lang: default_lang(),
        }
    }
}

impl AmmoQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsQuery {
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for MapsQuery {
    fn default() -> Self {
        Self {
            lang: default_lang(),
        }
    }
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

fn default_ammo_limit() -> u32 {
    DEFAULT_AMMO_LIMIT
}

// == Documents ==
pub const AMMO_ITEMS_QUERY: &str = r#"
query GetAmmoItems($limit: Int, $offset: Int, $lang: LanguageCode) {
  items(limit: $limit, offset: $offset, type: ammo, lang: $lang) {
    id
    name
    shortName
    iconLink
    avg24hPrice
    basePrice
    wikiLink
    weight
    width
    height
    types
    properties {
      ... on ItemPropertiesAmmo {
        damage
        penetrationPower
        armorDamage
        fragmentationChance
        ricochetChance
        initialSpeed
        caliber
      }
    }
  }
}
"#;

pub const MAPS_QUERY: &str = r#"
query GetMaps($lang: LanguageCode) {
  maps(lang: $lang) {
    id
    name
    normalizedName
    wiki
    description
    raidDuration
    players
    minPlayerLevel
    maxPlayerLevel
    bosses {
      boss { id name normalizedName imagePortraitLink imagePosterLink }
      spawnChance
      spawnLocations { name chance }
      escorts {
        boss { id name normalizedName }
        amount { count chance }
      }
      spawnTime
      spawnTimeRandom
      spawnTrigger
    }
    extracts { id name faction }
  }
}
"#;

pub const MAP_BY_ID_QUERY: &str = r#"
query GetMapById($id: ID!, $lang: LanguageCode) {
  map(id: $id, lang: $lang) {
    id
    name
    normalizedName
    wiki
    description
    raidDuration
    players
    minPlayerLevel
    maxPlayerLevel
    bosses {
      boss {
        id
        name
        normalizedName
        imagePortraitLink
        imagePosterLink
        health { bodyPart max }
      }
      spawnChance
      spawnLocations { name chance spawnKey }
      escorts {
        boss { id name normalizedName }
        amount { count chance }
      }
      spawnTime
      spawnTimeRandom
      spawnTrigger
    }
    extracts { id name faction requirement }
    accessKeys { id name shortName iconLink }
    accessKeysMinPlayerLevel
  }
}
"#;

pub const BOSSES_QUERY: &str = r#"
query GetAllBosses {
  maps {
    id
    name
    bosses {
      boss { id name normalizedName }
      spawnChance
    }
  }
}
"#;

pub const HIGH_VALUE_ITEMS_QUERY: &str = r#"
query GetHighValueItems($names: [String]) {
  items(names: $names) {
    id
    name
    shortName
    iconLink
    avg24hPrice
    basePrice
    wikiLink
    weight
    width
    height
    types
    buyFor { vendor { name normalizedName } price currency priceRUB }
    sellFor { vendor { name normalizedName } price currency priceRUB }
  }
}
"#;
