//! Cache entry and statistics types

use std::time::SystemTime;

/// Last known size of one directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Regular-file bytes under the directory at the last successful walk
    pub size_bytes: u64,
    /// The directory's own modification time seen by that walk
    pub observed_mod_time: SystemTime,
}

impl CacheEntry {
    pub fn new(size_bytes: u64, observed_mod_time: SystemTime) -> Self {
        Self {
            size_bytes,
            observed_mod_time,
        }
    }

    /// Only a strictly newer timestamp makes the entry stale
    #[inline]
    pub fn is_stale(&self, current_mod_time: SystemTime) -> bool {
        current_mod_time > self.observed_mod_time
    }
}

/// How a lookup was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from the cache without walking
    Hit,
    /// First query for the path
    Miss,
    /// Entry was stale and has been rewalked
    Recomputed,
}

impl LookupOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, LookupOutcome::Hit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupOutcome::Hit => "hit",
            LookupOutcome::Miss => "miss",
            LookupOutcome::Recomputed => "recomputed",
        }
    }
}

/// Result of `SizeCache::lookup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub size_bytes: u64,
    pub observed_mod_time: SystemTime,
    pub outcome: LookupOutcome,
}

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SizeCacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups for paths not yet cached
    pub misses: u64,
    /// Lookups that found a stale entry and rewalked
    pub recomputes: u64,
    /// Lookups that failed reading the timestamp or walking
    pub failures: u64,
}

impl SizeCacheStats {
    /// Number of walks performed
    #[inline]
    pub fn walks(&self) -> u64 {
        self.misses + self.recomputes
    }

    /// Share of successful lookups served without a walk
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.walks();
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}
