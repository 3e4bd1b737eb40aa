//! Measurement output - text lines and the JSON report

use chrono::{DateTime, Utc};
use dirsize_core::{Lookup, SizeCacheConfig, SizeCacheStats};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// One timed `get_size` call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Display form of the path; non UTF-8 bytes become U+FFFD
    pub path: String,
    pub size_bytes: u64,
    pub elapsed_secs: f64,
    pub cache_hit: bool,
    pub outcome: &'static str,
    pub observed_mod_time: DateTime<Utc>,
}

impl Measurement {
    pub fn new(path: &Path, lookup: Lookup, elapsed: Duration) -> Self {
        Self {
            path: path.display().to_string(),
            size_bytes: lookup.size_bytes,
            elapsed_secs: elapsed.as_secs_f64(),
            cache_hit: lookup.outcome.is_hit(),
            outcome: lookup.outcome.as_str(),
            observed_mod_time: DateTime::<Utc>::from(lookup.observed_mod_time),
        }
    }

    /// `Disk space usage for "<path>": <n> bytes`
    pub fn usage_line(&self, after_sleep: bool) -> String {
        let suffix = if after_sleep {
            " (after modification)"
        } else {
            ""
        };
        format!(
            "Disk space usage for {:?}{}: {} bytes",
            self.path, suffix, self.size_bytes
        )
    }

    /// `Time elapsed for <ordinal> call: <secs>s`
    pub fn elapsed_line(&self, ordinal: &str) -> String {
        format!("Time elapsed for {} call: {}s", ordinal, self.elapsed_secs)
    }
}

/// Cache statistics as they appear in the JSON report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub hits: u64,
    pub misses: u64,
    pub recomputes: u64,
    pub failures: u64,
    pub hit_rate: f64,
}

impl From<SizeCacheStats> for StatsReport {
    fn from(stats: SizeCacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            recomputes: stats.recomputes,
            failures: stats.failures,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub config: SizeCacheConfig,
    pub measurements: Vec<Measurement>,
    pub stats: StatsReport,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
