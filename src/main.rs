//! Range Cache benchmark
//!
//! Generates a skewed workload of range sums and point updates, then compares
//! an uncached run against the LRU range cache.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use range_cache::cli::Cli;
use range_cache::config::Config;
use range_cache::harness::run_benchmark;

/// Main entry point for the benchmark.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables, then apply CLI flags
/// 3. Generate the workload and run both engines
/// 4. Print the report to stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "range_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());
    info!(
        "Configuration loaded: n={}, q={}, k={}, seed={}",
        config.n, config.q, config.k, config.seed
    );

    let report = run_benchmark(&config).context("benchmark run failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        println!("{report}");
    }

    Ok(())
}
