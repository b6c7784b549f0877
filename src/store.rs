//! Store Module
//!
//! The mutable backing array that range queries aggregate over.

use crate::cache::RangeKey;
use crate::error::{CacheError, Result};

// == Store ==
/// Ordered, in-place mutable sequence of integers indexed `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    values: Vec<i64>,
}

impl Store {
    // == Constructor ==
    /// Wraps `values` as a store.
    ///
    /// Fails with `InvalidConfiguration` for an empty vector, since no range
    /// can be valid over it.
    pub fn new(values: Vec<i64>) -> Result<Self> {
        if values.is_empty() {
            return Err(CacheError::InvalidConfiguration(
                "store must hold at least one value".to_string(),
            ));
        }
        Ok(Self { values })
    }

    // == Get ==
    pub fn get(&self, index: usize) -> Result<i64> {
        self.values
            .get(index)
            .copied()
            .ok_or(CacheError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    // == Set ==
    /// Overwrites `values[index]`. Nothing is written when `index` is out of range.
    pub fn set(&mut self, index: usize, value: i64) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(CacheError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    // == Range Sum ==
    /// Sums the inclusive range by direct traversal.
    ///
    /// Fails with `Overflow` when the total does not fit in an `i64`.
    pub fn range_sum(&self, key: RangeKey) -> Result<i64> {
        let key = self.check_range(key.left, key.right)?;
        self.values[key.left..=key.right]
            .iter()
            .try_fold(0i64, |total, value| total.checked_add(*value))
            .ok_or(CacheError::Overflow {
                left: key.left,
                right: key.right,
            })
    }

    /// Validates `[left, right]` against this store's length.
    pub fn check_range(&self, left: usize, right: usize) -> Result<RangeKey> {
        RangeKey::checked(left, right, self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a store is never constructed empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
