//! Configuration Module
//!
//! Handles loading and validating benchmark configuration from environment
//! variables, with command-line flags layered on top by the binary.

use std::env;

use serde::Serialize;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{CacheError, Result};
use crate::workload::WorkloadConfig;

/// Benchmark configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Store size (array length)
    pub n: usize,
    /// Number of operations in the generated workload
    pub q: usize,
    /// Cache capacity
    pub k: usize,
    /// RNG seed for reproducible workload generation
    pub seed: u64,
    /// Number of hot ranges in the workload
    pub hot_pool: usize,
    /// Probability a read draws from the hot pool
    pub p_hot: f64,
    /// Probability an operation is an update
    pub p_update: f64,
    /// Upper bound for generated store values
    pub max_value: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RANGE_CACHE_N` - Store size (default: 100000)
    /// - `RANGE_CACHE_Q` - Number of operations (default: 50000)
    /// - `RANGE_CACHE_K` - Cache capacity (default: 1000)
    /// - `RANGE_CACHE_SEED` - Workload seed (default: 42)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            n: env_or("RANGE_CACHE_N", defaults.n),
            q: env_or("RANGE_CACHE_Q", defaults.q),
            k: env_or("RANGE_CACHE_K", defaults.k),
            seed: env_or("RANGE_CACHE_SEED", defaults.seed),
            ..defaults
        }
    }

    /// Checks every parameter before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(CacheError::InvalidConfiguration(
                "cache capacity must be positive".to_string(),
            ));
        }
        self.workload().validate()
    }

    /// Workload shape described by this config.
    pub fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            n: self.n,
            q: self.q,
            hot_pool: self.hot_pool,
            p_hot: self.p_hot,
            p_update: self.p_update,
            max_value: self.max_value,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let workload = WorkloadConfig::default();
        Self {
            n: workload.n,
            q: workload.q,
            k: DEFAULT_CAPACITY,
            seed: 42,
            hot_pool: workload.hot_pool,
            p_hot: workload.p_hot,
            p_update: workload.p_update,
            max_value: workload.max_value,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
