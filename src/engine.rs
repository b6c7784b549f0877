//! Query Engine Module
//!
//! Answers range-sum and point-update operations over a [`Store`], with and
//! without a [`RangeCache`] in front of it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, RangeCache};
use crate::error::Result;
use crate::store::Store;

// == Query Engine Trait ==
/// Request/response surface shared by the cached engine and the baseline.
pub trait QueryEngine {
    /// Returns the sum of `store[left..=right]`.
    fn range_sum(&mut self, left: usize, right: usize) -> Result<i64>;

    /// Writes `value` into `store[index]`.
    fn update(&mut self, index: usize, value: i64) -> Result<()>;

    /// Cache statistics, if the engine has a cache.
    fn cache_stats(&self) -> Option<CacheStats> {
        None
    }
}

// == Cached Query Engine ==
/// Composes a [`Store`] with a [`RangeCache`].
///
/// Every update invalidates the cached ranges covering the written index
/// after the write lands, so a cache hit always matches the current store.
#[derive(Debug)]
pub struct CachedQueryEngine {
    store: Store,
    cache: RangeCache,
}

impl CachedQueryEngine {
    // == Constructor ==
    /// Creates an engine owning `store` with an empty cache of `capacity`.
    pub fn new(store: Store, capacity: usize) -> Result<Self> {
        Ok(Self {
            store,
            cache: RangeCache::new(capacity)?,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn cache(&self) -> &RangeCache {
        &self.cache
    }
}

impl QueryEngine for CachedQueryEngine {
    // == Range Sum ==
    /// Serves from the cache on a hit; otherwise sums the store and caches
    /// the result. Invalid ranges are rejected before the cache is consulted.
    fn range_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        let key = self.store.check_range(left, right)?;

        if let Some(total) = self.cache.get(key) {
            return Ok(total);
        }

        let total = self.store.range_sum(key)?;
        self.cache.put(key, total);
        Ok(total)
    }

    // == Update ==
    fn update(&mut self, index: usize, value: i64) -> Result<()> {
        self.store.set(index, value)?;
        self.cache.invalidate_overlapping(index);
        Ok(())
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(self.cache.stats())
    }
}

// == Baseline Engine ==
/// Uncached reference engine: every query traverses the store.
#[derive(Debug, Clone)]
pub struct BaselineEngine {
    store: Store,
}

impl BaselineEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl QueryEngine for BaselineEngine {
    fn range_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        let key = self.store.check_range(left, right)?;
        self.store.range_sum(key)
    }

    fn update(&mut self, index: usize, value: i64) -> Result<()> {
        self.store.set(index, value)
    }
}

// == Shared Engine ==
/// Thread-safe handle around a [`CachedQueryEngine`].
///
/// One lock covers both the store and the cache for the whole of each call,
/// so no reader can observe a cached range between a write and its
/// invalidation. Clones share the same engine.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<CachedQueryEngine>>,
}

impl SharedEngine {
    pub fn new(engine: CachedQueryEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn range_sum(&self, left: usize, right: usize) -> Result<i64> {
        self.lock().range_sum(left, right)
    }

    pub fn update(&self, index: usize, value: i64) -> Result<()> {
        self.lock().update(index, value)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock().cache.stats()
    }

    // Engine calls never panic while holding the lock, so a poisoned guard
    // still wraps a consistent engine.
    fn lock(&self) -> MutexGuard<'_, CachedQueryEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl QueryEngine for SharedEngine {
    fn range_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        SharedEngine::range_sum(self, left, right)
    }

    fn update(&mut self, index: usize, value: i64) -> Result<()> {
        SharedEngine::update(self, index, value)
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(SharedEngine::cache_stats(self))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RangeKey;
    use crate::error::CacheError;
    use std::thread;

    fn engine(capacity: usize) -> CachedQueryEngine {
        let store = Store::new((1..=10).collect()).unwrap();
        CachedQueryEngine::new(store, capacity).unwrap()
    }

    #[test]
    fn test_engine_zero_capacity() {
        let store = Store::new(vec![1, 2, 3]).unwrap();
        let result = CachedQueryEngine::new(store, 0);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_engine_miss_then_hit() {
        let mut engine = engine(2);

        assert_eq!(engine.range_sum(2, 5).unwrap(), 18);
        assert_eq!(engine.cache().misses(), 1);
        assert_eq!(engine.cache().peek(RangeKey::new(2, 5)), Some(18));

        assert_eq!(engine.range_sum(2, 5).unwrap(), 18);
        assert_eq!(engine.cache().hits(), 1);
    }

    #[test]
    fn test_engine_update_invalidates() {
        let mut engine = engine(4);

        engine.range_sum(2, 5).unwrap();
        engine.range_sum(6, 9).unwrap();
        engine.update(3, 100).unwrap();

        assert!(!engine.cache().contains(RangeKey::new(2, 5)));
        assert!(engine.cache().contains(RangeKey::new(6, 9)));
        assert_eq!(engine.range_sum(2, 5).unwrap(), 114);
    }

    #[test]
    fn test_engine_rejected_query_leaves_state() {
        let mut engine = engine(4);
        engine.range_sum(0, 1).unwrap();
        let stats_before = engine.cache().stats();

        assert!(matches!(
            engine.range_sum(5, 2),
            Err(CacheError::OutOfRange { .. })
        ));
        assert!(matches!(
            engine.range_sum(0, 10),
            Err(CacheError::OutOfRange { .. })
        ));

        assert_eq!(engine.cache().stats(), stats_before);
    }

    #[test]
    fn test_engine_rejected_update_leaves_state() {
        let mut engine = engine(4);
        engine.range_sum(0, 9).unwrap();
        let store_before = engine.store().clone();

        let result = engine.update(10, 7);

        assert_eq!(result, Err(CacheError::IndexOutOfRange { index: 10, len: 10 }));
        assert_eq!(engine.store(), &store_before);
        assert!(engine.cache().contains(RangeKey::new(0, 9)));
    }

    #[test]
    fn test_engine_overflowing_sum_is_not_cached() {
        let mut engine = engine(4);
        engine.update(0, i64::MAX).unwrap();

        assert_eq!(
            engine.range_sum(0, 1),
            Err(CacheError::Overflow { left: 0, right: 1 })
        );
        assert!(!engine.cache().contains(RangeKey::new(0, 1)));

        engine.update(0, 1).unwrap();
        assert_eq!(engine.range_sum(0, 1).unwrap(), 3);
    }

    #[test]
    fn test_baseline_engine() {
        let mut baseline = BaselineEngine::new(Store::new((1..=10).collect()).unwrap());

        assert_eq!(baseline.range_sum(2, 5).unwrap(), 18);
        baseline.update(3, 100).unwrap();
        assert_eq!(baseline.range_sum(2, 5).unwrap(), 114);
        assert!(baseline.cache_stats().is_none());
    }

    #[test]
    fn test_shared_engine_across_threads() {
        let shared = SharedEngine::new(engine(8));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.range_sum(0, 9).unwrap();
                        shared.update(i, 1).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Indices 0..4 were all set to 1: 4 + (5 + 6 + 7 + 8 + 9 + 10)
        assert_eq!(shared.range_sum(0, 9).unwrap(), 49);
        assert_eq!(shared.range_sum(0, 3).unwrap(), 4);
    }
}
