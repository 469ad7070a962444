//! Item rankings
//!
//! Orderings applied to item lists before they are cached.

use crate::models::{Ammo, Item};

/// Sorts by average price, highest first. A missing price counts as 0; equal
/// prices are ordered by name.
pub fn rank_high_value_items(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| {
        b.price_or_zero()
            .cmp(&a.price_or_zero())
            .then_with(|| a.name.cmp(&b.name))
    });
    items
}

/// The `limit` rounds with the highest penetration power, ties by name.
pub fn top_ammo(mut ammo: Vec<Ammo>, limit: usize) -> Vec<Ammo> {
    ammo.sort_by(|a, b| {
        b.penetration_power()
            .cmp(&a.penetration_power())
            .then_with(|| a.item.name.cmp(&b.item.name))
    });
    ammo.truncate(limit);
    ammo
}
