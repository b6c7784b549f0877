//! Cache Module
//!
//! Provides an LRU cache keyed by index ranges, with overlap invalidation.

mod entry;
mod key;
mod lru;
mod range_cache;
mod stats;


// Re-export public types
pub(crate) use entry::CacheEntry;
pub use key::RangeKey;
pub(crate) use lru::LruTracker;
pub use range_cache::RangeCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Cache capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1000;
