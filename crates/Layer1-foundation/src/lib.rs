//! # dirsize-foundation
//!
//! Foundation layer for dirsize:
//! - Error: the IO-only error type shared by every layer
//! - Config: size cache and walk settings
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  dirsize (CLI)                               │
//! │                     │                        │
//! │                     ▼                        │
//! │          SizeCache (mtime staleness)         │
//! │                     │                        │
//! │                     ▼                        │
//! │          SizeWalker (recursive sum)          │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::{SizeCacheConfig, WalkErrorPolicy};
