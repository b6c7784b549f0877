//! Range Key Module
//!
//! Defines the inclusive `(left, right)` index pair used as a cache key.

use serde::Serialize;

use crate::error::{CacheError, Result};

// == Range Key ==
/// Inclusive index range `[left, right]` identifying one aggregate query.
///
/// Equality and hashing are component-wise, so two keys naming the same
/// range always address the same cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RangeKey {
    pub left: usize,
    pub right: usize,
}

impl RangeKey {
    // == Constructor ==
    /// Creates a key without bounds checking.
    ///
    /// The cache itself never looks at the store length, so any pair is a
    /// usable key. Use [`RangeKey::checked`] at the engine boundary.
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    // == Checked Constructor ==
    /// Creates a key valid for a store of length `len`.
    ///
    /// Fails with `OutOfRange` when `left > right` or `right >= len`.
    pub fn checked(left: usize, right: usize, len: usize) -> Result<Self> {
        if left > right || right >= len {
            return Err(CacheError::OutOfRange { left, right, len });
        }
        Ok(Self { left, right })
    }

    // == Covers ==
    /// Returns true if `index` lies inside the range.
    pub fn covers(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }
}

impl From<(usize, usize)> for RangeKey {
    fn from((left, right): (usize, usize)) -> Self {
        Self::new(left, right)
    }
}
