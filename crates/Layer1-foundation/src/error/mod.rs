//! Error types for dirsize
//!
//! Every failure in dirsize is an IO failure; the variants only differ in
//! which step failed and which path it failed on.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// dirsize error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Cache
    // ========================================================================
    #[error("Cannot read modification time of {}: {source}", path.display())]
    ModTime {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ========================================================================
    // Walk
    // ========================================================================
    #[error("Walk failed at {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Timestamp read error helper
    pub fn mod_time(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ModTime {
            path: path.into(),
            source,
        }
    }

    /// Walk error helper
    pub fn walk(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Walk {
            path: path.into(),
            source,
        }
    }

    /// Underlying IO error kind
    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().kind()
    }

    /// The wrapped IO error
    pub fn io_error(&self) -> &io::Error {
        match self {
            Error::ModTime { source, .. } | Error::Walk { source, .. } => source,
        }
    }

    /// Whether the failing path did not exist
    pub fn is_not_found(&self) -> bool {
        self.kind() == io::ErrorKind::NotFound
    }

    /// Path the error happened on
    pub fn path(&self) -> &Path {
        match self {
            Error::ModTime { path, .. } | Error::Walk { path, .. } => path,
        }
    }
}
