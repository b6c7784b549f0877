//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use crate::cache::lru::Slot;

// == Cache Entry ==
/// A cached range aggregate and its position in the recency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Sum of the store over the key's range when the entry was written
    pub value: i64,
    /// Recency slot owned by the cache's `LruTracker`
    pub(crate) slot: Slot,
}

impl CacheEntry {
    // == Constructor ==
    pub(crate) fn new(value: i64, slot: Slot) -> Self {
        Self { value, slot }
    }
}
