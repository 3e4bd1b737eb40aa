//! # dirsize-core
//!
//! Core runtime for dirsize:
//! - Walker: recursive regular-file byte count (`compute_size`, `FsWalker`)
//! - Cache: `SizeCache`, sizes keyed by path and validated by the
//!   directory's modification time

pub mod cache;
pub mod walker;

pub use cache::{CacheEntry, Lookup, LookupOutcome, SizeCache, SizeCacheStats};
pub use walker::{compute_size, FsWalker, SizeSource};

// Layer1 re-exports
pub use dirsize_foundation::{Error, Result, SizeCacheConfig, WalkErrorPolicy};
