//! Boss spawn aggregation
//!
//! Collapses per-map boss spawn records into one ranked summary per boss, and
//! builds the boss roster of a single map.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{BossSpawn, BossSummary, GameMap, MapSummary};

/// Normalized names of generic factions that are not shown as bosses.
pub const EXCLUDED_BOSS_NAMES: [&str; 4] = ["rogue", "usec", "bear", "raider"];

// == Merge ==
/// Folds every boss spawn of every map into one summary per boss id.
///
/// A boss keeps the highest spawn chance seen and every map it was seen on,
/// in encounter order (a map listed twice appears twice). The result is sorted
/// by spawn rate, highest first; equal rates keep first-seen order.
pub fn merge_boss_spawns(maps: &[MapSummary]) -> Vec<BossSummary> {
    let mut summaries: Vec<BossSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for map in maps {
        for spawn in &map.bosses {
            match index.get(spawn.boss.id.as_str()) {
                Some(&slot) => {
                    let summary = &mut summaries[slot];
                    summary.maps.push(map.name.clone());
                    summary.spawn_rate = summary.spawn_rate.max(spawn.spawn_chance);
                }
                None => {
                    index.insert(spawn.boss.id.as_str(), summaries.len());
                    summaries.push(BossSummary {
                        id: spawn.boss.id.clone(),
                        name: spawn.boss.name.clone(),
                        spawn_rate: spawn.spawn_chance,
                        maps: vec![map.name.clone()],
                    });
                }
            }
        }
    }

    // sort_by is stable
    summaries.sort_by(|a, b| by_rate_desc(a.spawn_rate, b.spawn_rate));
    summaries
}

// == Map Roster ==
/// Bosses of one map without the generic factions, highest spawn chance first.
pub fn map_boss_roster(map: &GameMap) -> Vec<BossSpawn> {
    let mut roster: Vec<BossSpawn> = map
        .bosses
        .iter()
        .filter(|spawn| !is_excluded(&spawn.boss.normalized_name))
        .cloned()
        .collect();

    roster.sort_by(|a, b| by_rate_desc(a.spawn_chance, b.spawn_chance));
    roster
}

fn is_excluded(normalized_name: &str) -> bool {
    EXCLUDED_BOSS_NAMES
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(normalized_name))
}

fn by_rate_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
