//! Error types for the range cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache, the store and the query engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction-time parameter is unusable (zero capacity, empty store, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Range is inverted or reaches past the end of the store
    #[error("Range [{left}, {right}] out of range for length {len}")]
    OutOfRange {
        left: usize,
        right: usize,
        len: usize,
    },

    /// Single index reaches past the end of the store
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Range sum does not fit in an i64
    #[error("Sum of range [{left}, {right}] overflows i64")]
    Overflow { left: usize, right: usize },

    /// Cached and uncached runs disagreed on the result of the same workload
    #[error("Freshness violation: {0}")]
    FreshnessViolation(String),
}

// == Result Type Alias ==
/// Convenience Result type for the range cache.
pub type Result<T> = std::result::Result<T, CacheError>;
