//! Range Cache Module
//!
//! Capacity-bounded LRU cache keyed by index ranges, with overlap
//! invalidation for point updates.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker, RangeKey};
use crate::error::{CacheError, Result};

// == Range Cache ==
/// LRU cache mapping a [`RangeKey`] to its cached aggregate.
///
/// Membership is a `HashMap` lookup and recency is an arena linked list, so
/// `get`, `put` and eviction are O(1). `invalidate_overlapping` scans every
/// resident entry, which is bounded by `capacity`.
#[derive(Debug)]
pub struct RangeCache {
    /// Key to cached value and recency slot
    entries: HashMap<RangeKey, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of resident entries
    capacity: usize,
}

impl RangeCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "cache capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity + 1),
            lru: LruTracker::with_capacity(capacity + 1),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Returns the cached value for `key` and marks it most recently used.
    ///
    /// Counts a hit when present and a miss otherwise.
    pub fn get(&mut self, key: RangeKey) -> Option<i64> {
        match self.entries.get(&key) {
            Some(entry) => {
                self.lru.touch(entry.slot);
                self.stats.record_hit();
                Some(entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the cached value without touching recency or counters.
    pub fn peek(&self, key: RangeKey) -> Option<i64> {
        self.entries.get(&key).map(|entry| entry.value)
    }

    // == Put ==
    /// Inserts or overwrites the entry for `key` and marks it most recently used.
    ///
    /// If the insert pushes the cache over capacity, the least recently used
    /// entry is evicted before returning.
    pub fn put(&mut self, key: RangeKey, value: i64) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            self.lru.touch(entry.slot);
            return;
        }

        let slot = self.lru.push_front(key);
        self.entries.insert(key, CacheEntry::new(value, slot));

        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(left = evicted.left, right = evicted.right, "evicted LRU range");
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Invalidate Overlapping ==
    /// Removes every entry whose range covers `index`.
    ///
    /// Surviving entries keep their values and relative recency order.
    /// Returns the number of entries removed; zero is not an error.
    pub fn invalidate_overlapping(&mut self, index: usize) -> usize {
        let stale: Vec<RangeKey> = self
            .entries
            .keys()
            .filter(|key| key.covers(index))
            .copied()
            .collect();

        for key in &stale {
            if let Some(entry) = self.entries.remove(key) {
                self.lru.remove(entry.slot);
            }
        }

        let count = stale.len();
        if count > 0 {
            self.stats.record_invalidations(count);
            self.stats.set_total_entries(self.entries.len());
            debug!(index, count, "invalidated overlapping ranges");
        }
        count
    }

    // == Hits ==
    /// Returns the number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.stats.hits
    }

    // == Misses ==
    /// Returns the number of lookups that found no entry.
    pub fn misses(&self) -> u64 {
        self.stats.misses
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Capacity ==
    /// Returns the maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Contains ==
    /// Checks if `key` is resident, without touching recency or counters.
    pub fn contains(&self, key: RangeKey) -> bool {
        self.entries.contains_key(&key)
    }

    // == Keys ==
    /// Resident keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &RangeKey> + '_ {
        self.lru.iter()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
