//! Benchmark Harness Module
//!
//! Times the uncached baseline against the cached engine over one generated
//! workload and reports latency and hit statistics.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::cache::CacheStats;
use crate::config::Config;
use crate::engine::{BaselineEngine, CachedQueryEngine, QueryEngine};
use crate::error::{CacheError, Result};
use crate::store::Store;
use crate::workload::{Operation, WorkloadGenerator};

// == Run Stats ==
/// Outcome of applying one workload to one engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Wall-clock time spent applying the operations
    pub seconds: f64,
    /// Number of operations applied
    pub operations: usize,
    /// Cache counters at the end of the run; all zero for an uncached engine
    #[serde(flatten)]
    pub cache: CacheStats,
    /// XOR of every range-sum result, so runs can be compared cheaply
    pub sink: i64,
}

// == Run Workload ==
/// Applies `ops` to `engine` in order.
///
/// The first rejected operation aborts the run; generated workloads are
/// always in range, so a rejection means the generator is broken.
pub fn run_workload<E: QueryEngine>(engine: &mut E, ops: &[Operation]) -> Result<RunStats> {
    let start = Instant::now();
    let mut sink = 0i64;

    for (position, op) in ops.iter().enumerate() {
        let outcome = match *op {
            Operation::Range { left, right } => engine.range_sum(left, right).map(|total| {
                sink ^= total;
            }),
            Operation::Update { index, value } => engine.update(index, value),
        };
        if let Err(err) = outcome {
            warn!(position, ?op, %err, "operation rejected, aborting run");
            return Err(err);
        }
    }

    let seconds = start.elapsed().as_secs_f64();
    Ok(RunStats {
        seconds,
        operations: ops.len(),
        cache: engine.cache_stats().unwrap_or_default(),
        sink,
    })
}

// == Benchmark Report ==
/// Side-by-side comparison of the baseline and cached runs.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Report creation time in RFC 3339 format
    pub generated_at: String,
    pub config: Config,
    pub baseline: RunStats,
    pub cached: RunStats,
    /// baseline / cached elapsed time; infinite when the cached run took no time
    pub speedup: f64,
    /// Hits as a percentage of lookups
    pub hit_rate_percent: f64,
}

impl BenchmarkReport {
    pub fn new(config: Config, baseline: RunStats, cached: RunStats) -> Self {
        let speedup = if cached.seconds > 0.0 {
            baseline.seconds / cached.seconds
        } else {
            f64::INFINITY
        };
        let hit_rate_percent = cached.cache.hit_rate() * 100.0;

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            config,
            baseline,
            cached,
            speedup,
            hit_rate_percent,
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No cache : {:7.2} s", self.baseline.seconds)?;
        writeln!(
            f,
            "LRU cache: {:7.2} s  (speedup x{:.1})",
            self.cached.seconds, self.speedup
        )?;
        writeln!(f, "  Cache hits  : {}", self.cached.cache.hits)?;
        writeln!(f, "  Cache misses: {}", self.cached.cache.misses)?;
        write!(f, "  Hit rate    : {:.1}%", self.hit_rate_percent)
    }
}

// == Run Benchmark ==
/// Generates one workload from `config` and runs it through both engines.
///
/// Each engine gets its own copy of the initial store. The two runs must
/// produce the same range-sum results and final store, otherwise the cache
/// served a stale value and `FreshnessViolation` is returned.
pub fn run_benchmark(config: &Config) -> Result<BenchmarkReport> {
    config.validate()?;

    let mut generator = WorkloadGenerator::new(config.workload(), config.seed)?;
    let store = Store::new(generator.initial_values())?;
    let ops = generator.operations();
    info!(
        n = config.n,
        q = ops.len(),
        k = config.k,
        seed = config.seed,
        "workload generated"
    );

    let mut baseline = BaselineEngine::new(store.clone());
    let baseline_stats = run_workload(&mut baseline, &ops)?;
    info!(seconds = baseline_stats.seconds, "baseline run finished");

    let mut cached = CachedQueryEngine::new(store, config.k)?;
    let cached_stats = run_workload(&mut cached, &ops)?;
    info!(
        seconds = cached_stats.seconds,
        hits = cached_stats.cache.hits,
        misses = cached_stats.cache.misses,
        "cached run finished"
    );

    if baseline_stats.sink != cached_stats.sink {
        return Err(CacheError::FreshnessViolation(format!(
            "range-sum digest {} differs from baseline {}",
            cached_stats.sink, baseline_stats.sink
        )));
    }
    if baseline.store() != cached.store() {
        return Err(CacheError::FreshnessViolation(
            "final store differs from baseline".to_string(),
        ));
    }

    Ok(BenchmarkReport::new(
        config.clone(),
        baseline_stats,
        cached_stats,
    ))
}
