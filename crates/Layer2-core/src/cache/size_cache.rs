//! Size Cache - mtime-validated directory sizes
//!
//! Maps a directory path to the size computed by its last walk together with
//! the directory's own modification time at that moment. A lookup rewalks only
//! when the current modification time is strictly newer than the stored one.
//!
//! One mutex guards the whole table and is held across the walk, so callers
//! are fully serialized: a slow walk for one path delays lookups for every
//! other path.
//!
//! Only the directory's own timestamp is checked. Changing a file deeper in
//! the tree (without adding or removing an entry of the directory itself)
//! leaves the cached size in place until something touches the directory.

use dirsize_foundation::{Error, Result, SizeCacheConfig};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

use super::entry::{CacheEntry, Lookup, LookupOutcome, SizeCacheStats};
use crate::walker::{FsWalker, SizeSource};

/// Directory size cache
///
/// # Usage
///
/// ```rust,ignore
/// let cache = SizeCache::new();
///
/// let size = cache.get_size("/var/log")?;
/// // Unchanged directory: served without walking
/// let again = cache.get_size("/var/log")?;
/// ```
#[derive(Debug)]
pub struct SizeCache<S = FsWalker> {
    source: S,
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<PathBuf, CacheEntry>,
    stats: SizeCacheStats,
}

impl SizeCache<FsWalker> {
    /// Cache backed by a walker that aborts on unreadable entries
    pub fn new() -> Self {
        Self::with_config(&SizeCacheConfig::default())
    }

    pub fn with_config(config: &SizeCacheConfig) -> Self {
        Self::with_source(FsWalker::from_config(config))
    }
}

impl Default for SizeCache<FsWalker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SizeSource> SizeCache<S> {
    /// Cache backed by a custom size source
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Total regular-file bytes under `path`
    pub fn get_size(&self, path: impl AsRef<Path>) -> Result<u64> {
        self.lookup(path).map(|lookup| lookup.size_bytes)
    }

    /// Like `get_size`, but also reports whether the walk was skipped
    pub fn lookup(&self, path: impl AsRef<Path>) -> Result<Lookup> {
        let path = path.as_ref();
        let mut state = self.state.lock();

        let current = match read_mod_time(path) {
            Ok(t) => t,
            Err(err) => {
                state.stats.failures += 1;
                return Err(err);
            }
        };

        let cached = state.entries.get(path).copied();
        if let Some(entry) = cached {
            if !entry.is_stale(current) {
                state.stats.hits += 1;
                debug!("Cache hit for {}: {} bytes", path.display(), entry.size_bytes);
                return Ok(Lookup {
                    size_bytes: entry.size_bytes,
                    observed_mod_time: entry.observed_mod_time,
                    outcome: LookupOutcome::Hit,
                });
            }
        }

        // A failed walk leaves any existing entry untouched
        let size_bytes = match self.source.compute_size(path) {
            Ok(size) => size,
            Err(err) => {
                state.stats.failures += 1;
                return Err(err);
            }
        };

        state
            .entries
            .insert(path.to_path_buf(), CacheEntry::new(size_bytes, current));

        let outcome = match cached {
            Some(previous) => {
                state.stats.recomputes += 1;
                info!(
                    "Recomputed {}: {} -> {} bytes",
                    path.display(),
                    previous.size_bytes,
                    size_bytes
                );
                LookupOutcome::Recomputed
            }
            None => {
                state.stats.misses += 1;
                debug!("Cache miss for {}: {} bytes", path.display(), size_bytes);
                LookupOutcome::Miss
            }
        };

        Ok(Lookup {
            size_bytes,
            observed_mod_time: current,
            outcome,
        })
    }

    /// Cached entry for `path`, without touching the filesystem
    pub fn entry(&self, path: impl AsRef<Path>) -> Option<CacheEntry> {
        self.state.lock().entries.get(path.as_ref()).copied()
    }

    /// Drop the entry for `path`; the next lookup walks again
    pub fn invalidate(&self, path: impl AsRef<Path>) -> Option<CacheEntry> {
        self.state.lock().entries.remove(path.as_ref())
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn stats(&self) -> SizeCacheStats {
        self.state.lock().stats
    }

    pub fn reset_stats(&self) {
        self.state.lock().stats = SizeCacheStats::default();
    }

    /// The size source used for walks
    pub fn source(&self) -> &S {
        &self.source
    }
}

fn read_mod_time(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| Error::mod_time(path, e))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::tempdir;

    /// Counts walks and can be told to fail
    #[derive(Default)]
    struct ScriptedSource {
        walks: AtomicUsize,
        fail: AtomicBool,
    }

    impl SizeSource for ScriptedSource {
        fn compute_size(&self, path: &Path) -> Result<u64> {
            self.walks.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::walk(
                    path,
                    io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                ));
            }
            FsWalker::new().compute_size(path)
        }
    }

    fn bump_mod_time(dir: &Path, secs: u64) {
        let later = SystemTime::now() + Duration::from_secs(secs);
        File::open(dir).unwrap().set_modified(later).unwrap();
    }

    #[test]
    fn test_hit_skips_walk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), [0u8; 12]).unwrap();
        let cache = SizeCache::with_source(ScriptedSource::default());

        let first = cache.lookup(dir.path()).unwrap();
        let second = cache.lookup(dir.path()).unwrap();

        assert_eq!(first.outcome, LookupOutcome::Miss);
        assert_eq!(second.outcome, LookupOutcome::Hit);
        assert_eq!(first.size_bytes, 12);
        assert_eq!(second.size_bytes, 12);
        assert_eq!(cache.source().walks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_newer_mod_time_recomputes() {
        let dir = tempdir().unwrap();
        let cache = SizeCache::with_source(ScriptedSource::default());
        assert_eq!(cache.get_size(dir.path()).unwrap(), 0);

        fs::write(dir.path().join("new"), [0u8; 7]).unwrap();
        bump_mod_time(dir.path(), 5);

        let lookup = cache.lookup(dir.path()).unwrap();
        assert_eq!(lookup.outcome, LookupOutcome::Recomputed);
        assert_eq!(lookup.size_bytes, 7);
        assert_eq!(cache.entry(dir.path()).unwrap().size_bytes, 7);
        assert_eq!(cache.source().walks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_older_mod_time_is_fresh() {
        let dir = tempdir().unwrap();
        let cache = SizeCache::new();
        cache.get_size(dir.path()).unwrap();

        // Moving the clock backwards never triggers a walk
        let earlier = SystemTime::now() - Duration::from_secs(3600);
        File::open(dir.path()).unwrap().set_modified(earlier).unwrap();
        fs::write(dir.path().join("late"), [0u8; 9]).unwrap();
        File::open(dir.path()).unwrap().set_modified(earlier).unwrap();

        let lookup = cache.lookup(dir.path()).unwrap();
        assert!(lookup.outcome.is_hit());
        assert_eq!(lookup.size_bytes, 0);
    }

    #[test]
    fn test_failed_recompute_keeps_entry() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), [0u8; 30]).unwrap();
        let cache = SizeCache::with_source(ScriptedSource::default());
        cache.get_size(dir.path()).unwrap();
        let before = cache.entry(dir.path()).unwrap();

        fs::write(dir.path().join("b"), [0u8; 5]).unwrap();
        bump_mod_time(dir.path(), 5);
        cache.source().fail.store(true, Ordering::SeqCst);

        let err = cache.get_size(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(cache.entry(dir.path()), Some(before));
        assert_eq!(cache.stats().failures, 1);

        // Still stale, so the next successful call picks up the change
        cache.source().fail.store(false, Ordering::SeqCst);
        assert_eq!(cache.get_size(dir.path()).unwrap(), 35);
    }

    #[test]
    fn test_missing_path_does_not_fall_back() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let cache = SizeCache::new();
        cache.get_size(&sub).unwrap();

        fs::remove_dir(&sub).unwrap();

        let err = cache.get_size(&sub).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::ModTime { .. }));
        // The old entry stays; only the lookup failed
        assert!(cache.entry(&sub).is_some());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        let cache = SizeCache::with_source(ScriptedSource::default());
        cache.get_size(a.path()).unwrap();
        cache.get_size(b.path()).unwrap();
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(a.path()).is_some());
        assert!(cache.invalidate(a.path()).is_none());
        assert_eq!(cache.lookup(a.path()).unwrap().outcome, LookupOutcome::Miss);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.source().walks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_keys_compare_by_path_components() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let cache = SizeCache::with_source(ScriptedSource::default());

        // Trailing separators and interior `.` do not make a new key
        cache.get_size(&sub).unwrap();
        cache.get_size(dir.path().join("sub/")).unwrap();
        cache.get_size(dir.path().join("./sub")).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.source().walks.load(Ordering::SeqCst), 1);

        // `..` is not resolved, so this is a separate entry
        cache.get_size(sub.join("../sub")).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.source().walks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_entries_are_independent() {
        let dir = tempdir().unwrap();
        let child = dir.path().join("child");
        fs::create_dir(&child).unwrap();
        fs::write(child.join("f"), [0u8; 20]).unwrap();
        let cache = SizeCache::new();

        assert_eq!(cache.get_size(dir.path()).unwrap(), 20);
        assert_eq!(cache.get_size(&child).unwrap(), 20);

        fs::write(child.join("g"), [0u8; 4]).unwrap();
        bump_mod_time(&child, 5);

        assert_eq!(cache.get_size(&child).unwrap(), 24);
        // Parent's own timestamp did not move
        assert_eq!(cache.get_size(dir.path()).unwrap(), 20);
    }

    #[test]
    fn test_stats() {
        let dir = tempdir().unwrap();
        let cache = SizeCache::new();

        cache.get_size(dir.path()).unwrap();
        cache.get_size(dir.path()).unwrap();
        cache.get_size(dir.path()).unwrap();
        bump_mod_time(dir.path(), 5);
        cache.get_size(dir.path()).unwrap();
        let _ = cache.get_size(dir.path().join("missing"));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.recomputes, 1);
        assert_eq!(stats.failures, 1);

        cache.reset_stats();
        assert_eq!(cache.stats(), SizeCacheStats::default());
    }

    #[test]
    fn test_cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SizeCache>();
        assert_send_sync::<SizeCache<ScriptedSource>>();
    }
}
