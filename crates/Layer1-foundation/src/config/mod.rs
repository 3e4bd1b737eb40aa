mod cache;

pub use cache::{SizeCacheConfig, WalkErrorPolicy};
