//! LRU Tracker Module
//!
//! Access-order tracking used to bound the number of cached responses.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for capacity eviction.
///
/// Front = most recently used, back = least recently used.
#[derive(Debug)]
pub struct LruTracker<K> {
    order: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }
}

impl<K: PartialEq + Clone> LruTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &K) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Evict ==
    /// Removes and returns the least recently used key that `evictable`
    /// accepts. Keys it rejects keep their position.
    pub fn evict_oldest_where<F>(&mut self, mut evictable: F) -> Option<K>
    where
        F: FnMut(&K) -> bool,
    {
        let index = self.order.iter().rposition(|k| evictable(k))?;
        self.order.remove(index)
    }

    /// Least recently used key, if any.
    #[cfg(test)]
    pub fn oldest(&self) -> Option<&K> {
        self.order.back()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        self.order.contains(key)
    }
}
