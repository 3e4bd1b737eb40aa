//! Two-call demonstration run

use crate::report::{Measurement, Report};
use anyhow::Context;
use dirsize_core::{SizeCache, SizeCacheConfig, SizeSource};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Options for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub directory: PathBuf,
    /// Pause between the two calls
    pub sleep: Duration,
    pub config: SizeCacheConfig,
    pub json: bool,
}

/// Size the directory twice with one cache, pausing in between
pub fn run(options: &RunOptions) -> anyhow::Result<()> {
    let cache = SizeCache::with_config(&options.config);
    let path = options.directory.as_path();

    let first = measure(&cache, path)?;
    if !options.json {
        println!("{}", first.usage_line(false));
        println!("{}", first.elapsed_line("first"));
    }

    if !options.sleep.is_zero() {
        tracing::info!("Sleeping {}s before the second call", options.sleep.as_secs());
        thread::sleep(options.sleep);
    }

    let second = measure(&cache, path)?;
    if !options.json {
        println!("{}", second.usage_line(true));
        println!("{}", second.elapsed_line("second"));
        return Ok(());
    }

    let report = Report {
        config: options.config.clone(),
        measurements: vec![first, second],
        stats: cache.stats().into(),
    };
    let json = report
        .to_json()
        .with_context(|| format!("Failed to render JSON report for {}", path.display()))?;
    println!("{}", json);

    Ok(())
}

/// Time a single lookup
fn measure<S: SizeSource>(cache: &SizeCache<S>, path: &Path) -> anyhow::Result<Measurement> {
    let start = Instant::now();
    let lookup = cache
        .lookup(path)
        .with_context(|| format!("Failed to compute disk usage for {}", path.display()))?;
    Ok(Measurement::new(path, lookup, start.elapsed()))
}
