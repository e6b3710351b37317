//! # rbench
//!
//! Micro-benchmark comparing two module-resolution engines (a caching
//! asynchronous engine and a straight-through synchronous one) on a
//! fixed specifier list. The run is strictly linear: build adapters,
//! sanity-check agreement, warm up, measure, print the comparison table.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rbench_benchmarks::{Bench, TaskFuture};
use rbench_config::BenchSettings;
use rbench_resolver::{
    CacheConfig, CachedAdapter, CachedResolver, DirectAdapter, DirectResolver, ResolveAdapter,
    ResolveOptions,
};

mod report;
mod sanity;

/// Module requests resolved by both engines on every task invocation
const SPECIFIERS: &[&str] = &["./entry.js", "./lib/math", "alpha", "@scope/beta", "gamma/util"];

/// Directory under the working directory holding the project tree the
/// specifiers resolve against
const FIXTURE_DIR: &str = "fixture";

fn main() -> Result<()> {
    setup_logging();

    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(run())
}

async fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let cwd = rbench_core::utils::to_utf8(cwd)?;
    let settings = BenchSettings::load(&cwd)?;
    let base = cwd.join(FIXTURE_DIR);

    info!("Starting rbench v{}", env!("CARGO_PKG_VERSION"));
    info!(base = %base, "resolving {} specifiers per task invocation", SPECIFIERS.len());

    let cached = CachedAdapter::new(CachedResolver::new(
        ResolveOptions::default(),
        CacheConfig {
            ttl: settings.cache_ttl(),
            capacity: settings.cache_capacity,
        },
    ));
    let direct = DirectAdapter::new(DirectResolver::new(ResolveOptions::default()));

    sanity::crosscheck(&cached, &direct, &base, SPECIFIERS).await?;
    info!("sanity check passed, both engines agree");

    let bench = Bench::new(settings.warm_up_time(), settings.measurement_time())
        .add(cached.name(), resolve_task(cached.clone(), base.clone()))
        .add(direct.name(), resolve_task(direct, base));

    info!(warm_up_ms = settings.warm_up_time_ms, "warming up");
    bench.warm_up().await?;

    info!(budget_ms = settings.measurement_time_ms, "measuring");
    let results = bench.run().await?;

    println!("{}", env!("RUSTC_VERSION"));
    print!("{}", report::render_table(&report::build_rows(&results)));
    Ok(())
}

/// Task body: resolve the whole specifier list once, sequentially
fn resolve_task<A>(adapter: A, base: Utf8PathBuf) -> impl Fn() -> TaskFuture
where
    A: ResolveAdapter + Clone + 'static,
{
    move || {
        let adapter = adapter.clone();
        let base = base.clone();
        Box::pin(async move {
            for request in SPECIFIERS {
                adapter.resolve(&base, request).await?;
            }
            anyhow::Ok(())
        })
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
