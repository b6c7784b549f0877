//! Range Cache - range-sum queries over a mutable array, accelerated by an
//! LRU cache of range results.
//!
//! Cached ranges are invalidated by any update to an index they cover, so a
//! cache hit always agrees with the current array.

pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod store;
pub mod workload;

pub use cache::{RangeCache, RangeKey};
pub use config::Config;
pub use engine::{BaselineEngine, CachedQueryEngine, QueryEngine, SharedEngine};
pub use error::{CacheError, Result};
pub use store::Store;
pub use workload::{Operation, WorkloadGenerator};
