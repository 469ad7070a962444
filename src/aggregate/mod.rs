//! Aggregation Module
//!
//! Pure transformations over fetched records. Nothing here touches the cache
//! or the network.

mod bosses;
mod items;

pub use bosses::{map_boss_roster, merge_boss_spawns, EXCLUDED_BOSS_NAMES};
pub use items::{rank_high_value_items, top_ammo};
