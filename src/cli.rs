//! Command-line surface for the benchmark binary.

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "range_cache")]
#[command(about = "Benchmark range-sum queries with and without an LRU range cache")]
#[command(version)]
pub struct Cli {
    /// Store size (array length) [default: 100000]
    #[arg(long)]
    pub n: Option<usize>,

    /// Number of operations in the generated workload [default: 50000]
    #[arg(long)]
    pub q: Option<usize>,

    /// Cache capacity [default: 1000]
    #[arg(long)]
    pub k: Option<usize>,

    /// RNG seed for reproducible workload generation [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of hot ranges [default: 30]
    #[arg(long)]
    pub hot_pool: Option<usize>,

    /// Probability a read draws from the hot pool [default: 0.95]
    #[arg(long)]
    pub p_hot: Option<f64>,

    /// Probability an operation is an update [default: 0.03]
    #[arg(long)]
    pub p_update: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Layers the flags that were given over `base`.
    pub fn apply(&self, base: Config) -> Config {
        Config {
            n: self.n.unwrap_or(base.n),
            q: self.q.unwrap_or(base.q),
            k: self.k.unwrap_or(base.k),
            seed: self.seed.unwrap_or(base.seed),
            hot_pool: self.hot_pool.unwrap_or(base.hot_pool),
            p_hot: self.p_hot.unwrap_or(base.p_hot),
            p_update: self.p_update.unwrap_or(base.p_update),
            ..base
        }
    }
}
