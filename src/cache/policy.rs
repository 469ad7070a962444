//! Cache Policy Module
//!
//! Freshness and idle-eviction windows per data category.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

const fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}

// == Category ==
/// Kind of data a cache entry holds; selects its windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Ammo listings, prices move quickly
    Ammo,
    /// Derived top-ammo view
    TopAmmo,
    /// Maps listing
    Maps,
    /// Single map detail
    MapDetail,
    /// Boss spawn aggregate across maps
    BossAggregate,
    /// Curated high-value items
    HighValueItems,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ammo,
        Category::TopAmmo,
        Category::Maps,
        Category::MapDetail,
        Category::BossAggregate,
        Category::HighValueItems,
    ];

    /// Default windows for this category.
    pub fn policy(self) -> CachePolicy {
        match self {
            Category::Ammo | Category::HighValueItems => CachePolicy::new(minutes(5), minutes(10)),
            Category::TopAmmo | Category::Maps | Category::BossAggregate => {
                CachePolicy::new(minutes(30), minutes(60))
            }
            Category::MapDetail => CachePolicy::new(minutes(60), minutes(120)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ammo => "ammo",
            Category::TopAmmo => "top_ammo",
            Category::Maps => "maps",
            Category::MapDetail => "map_detail",
            Category::BossAggregate => "boss_aggregate",
            Category::HighValueItems => "high_value_items",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Policy ==
/// How long an entry is served without refetching, and how long it may sit
/// unused before removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub freshness: Duration,
    pub idle_eviction: Duration,
}

impl CachePolicy {
    pub const fn new(freshness: Duration, idle_eviction: Duration) -> Self {
        Self {
            freshness,
            idle_eviction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_table() {
        let expected: [(Category, u64, u64); 6] = [
            (Category::Ammo, 5, 10),
            (Category::TopAmmo, 30, 60),
            (Category::Maps, 30, 60),
            (Category::MapDetail, 60, 120),
            (Category::BossAggregate, 30, 60),
            (Category::HighValueItems, 5, 10),
        ];

        for (category, fresh_min, idle_min) in expected {
            let policy = category.policy();
            assert_eq!(policy.freshness, minutes(fresh_min), "{}", category);
            assert_eq!(policy.idle_eviction, minutes(idle_min), "{}", category);
        }
    }

    #[test]
    fn test_idle_window_never_shorter_than_freshness() {
        for category in Category::ALL {
            let policy = category.policy();
            assert!(policy.idle_eviction >= policy.freshness);
        }
    }
}
