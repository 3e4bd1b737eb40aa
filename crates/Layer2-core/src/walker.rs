//! Size Walker - recursive regular-file byte count
//!
//! Sums the length of every regular file reachable under a root.
//! - Symlinks are never followed and count as 0
//! - Hidden and ignored files are counted (no gitignore filtering)
//! - Unreadable entries abort the walk unless the skip policy is set

use dirsize_foundation::{Error, Result, SizeCacheConfig, WalkErrorPolicy};
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Anything that can report the total byte size under a path
///
/// `SizeCache` calls this only when its staleness check demands a walk.
pub trait SizeSource: Send + Sync {
    fn compute_size(&self, path: &Path) -> Result<u64>;
}

/// Filesystem-backed size source
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker {
    policy: WalkErrorPolicy,
}

impl FsWalker {
    /// Walker that aborts on the first unreadable entry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: WalkErrorPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &SizeCacheConfig) -> Self {
        Self::with_policy(config.walk_error_policy)
    }

    pub fn policy(&self) -> WalkErrorPolicy {
        self.policy
    }

    /// Apply the error policy to a failed entry
    fn absorb(&self, root: &Path, err: ignore::Error) -> Result<()> {
        let err = walk_error(root, err);
        match self.policy {
            WalkErrorPolicy::Abort => Err(err),
            WalkErrorPolicy::Skip => {
                warn!("Skipping unreadable entry: {}", err);
                Ok(())
            }
        }
    }

    /// The root must be readable under every policy
    fn check_root(path: &Path) -> Result<()> {
        let meta = fs::metadata(path).map_err(|e| Error::walk(path, e))?;
        if meta.is_dir() {
            fs::read_dir(path).map_err(|e| Error::walk(path, e))?;
        }
        Ok(())
    }
}

impl SizeSource for FsWalker {
    fn compute_size(&self, path: &Path) -> Result<u64> {
        Self::check_root(path)?;

        let walker = WalkBuilder::new(path)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut total: u64 = 0;
        let mut files: u64 = 0;

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    self.absorb(path, err)?;
                    continue;
                }
            };

            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if !is_file {
                continue;
            }

            match entry.metadata() {
                Ok(meta) => {
                    total += meta.len();
                    files += 1;
                }
                Err(err) => self.absorb(path, err)?,
            }
        }

        debug!(
            "Walked {}: {} files, {} bytes",
            path.display(),
            files,
            total
        );
        Ok(total)
    }
}

/// Sum the regular-file bytes under `path`, aborting on the first error
pub fn compute_size(path: impl AsRef<Path>) -> Result<u64> {
    FsWalker::new().compute_size(path.as_ref())
}

/// Convert a walk error into ours, keeping the deepest known path
fn walk_error(root: &Path, err: ignore::Error) -> Error {
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
    Error::walk(path, source)
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
