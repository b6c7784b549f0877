//! Workload Generator Module
//!
//! Synthesizes a seeded stream of range reads and point updates with a small
//! pool of hot ranges to create access skew.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{CacheError, Result};

// == Operation ==
/// One item of the workload stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Sum of the inclusive range `[left, right]`
    Range { left: usize, right: usize },
    /// Write `value` at `index`
    Update { index: usize, value: i64 },
}

// == Workload Config ==
/// Shape of the generated stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadConfig {
    /// Store length; every index drawn lies in `[0, n)`
    pub n: usize,
    /// Number of operations to generate
    pub q: usize,
    /// Number of hot ranges
    pub hot_pool: usize,
    /// Probability a read draws from the hot pool
    pub p_hot: f64,
    /// Probability an operation is an update
    pub p_update: f64,
    /// Values are drawn from `1..=max_value`
    pub max_value: i64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            n: 100_000,
            q: 50_000,
            hot_pool: 30,
            p_hot: 0.95,
            p_update: 0.03,
            max_value: 100,
        }
    }
}

impl WorkloadConfig {
    /// Rejects shapes that cannot produce in-range operations.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(invalid("store size must be positive"));
        }
        if self.hot_pool == 0 {
            return Err(invalid("hot pool must hold at least one range"));
        }
        if self.max_value < 1 {
            return Err(invalid("max value must be positive"));
        }
        if !(0.0..=1.0).contains(&self.p_hot) {
            return Err(invalid("p_hot must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.p_update) {
            return Err(invalid("p_update must lie in [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> CacheError {
    CacheError::InvalidConfiguration(msg.to_string())
}

// == Workload Generator ==
/// Seeded producer of initial store contents and operation streams.
///
/// The generator owns its RNG; the same seed and config always yield the
/// same values and operations.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
    rng: StdRng,
}

impl WorkloadGenerator {
    pub fn new(config: WorkloadConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    // == Initial Values ==
    /// Draws `n` store values from `1..=max_value`.
    pub fn initial_values(&mut self) -> Vec<i64> {
        let max_value = self.config.max_value;
        (0..self.config.n)
            .map(|_| self.rng.gen_range(1..=max_value))
            .collect()
    }

    // == Hot Pool ==
    /// Draws the hot ranges: `left` from the lower half, `right` from the upper.
    pub fn hot_ranges(&mut self) -> Vec<(usize, usize)> {
        let n = self.config.n;
        let mid = n / 2;
        (0..self.config.hot_pool)
            .map(|_| {
                let left = self.rng.gen_range(0..=mid);
                let right = self.rng.gen_range(mid..n);
                (left, right)
            })
            .collect()
    }

    // == Operations ==
    /// Draws a fresh hot pool, then `q` operations.
    pub fn operations(&mut self) -> Vec<Operation> {
        let hot = self.hot_ranges();
        let WorkloadConfig {
            n,
            q,
            p_hot,
            p_update,
            max_value,
            ..
        } = self.config;

        (0..q)
            .map(|_| {
                if self.rng.gen_bool(p_update) {
                    Operation::Update {
                        index: self.rng.gen_range(0..n),
                        value: self.rng.gen_range(1..=max_value),
                    }
                } else if self.rng.gen_bool(p_hot) {
                    let (left, right) = hot[self.rng.gen_range(0..hot.len())];
                    Operation::Range { left, right }
                } else {
                    let left = self.rng.gen_range(0..n);
                    let right = self.rng.gen_range(left..n);
                    Operation::Range { left, right }
                }
            })
            .collect()
    }
}
