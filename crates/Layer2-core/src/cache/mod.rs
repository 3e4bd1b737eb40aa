//! # Directory size cache
//!
//! - [`size_cache`] - `SizeCache`, the lock-guarded path → size table
//! - [`entry`] - entry, lookup and statistics types

pub mod entry;
pub mod size_cache;

pub use entry::{CacheEntry, Lookup, LookupOutcome, SizeCacheStats};
pub use size_cache::SizeCache;
