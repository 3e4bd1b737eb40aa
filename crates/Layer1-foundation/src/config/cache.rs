//! Size cache configuration

use serde::{Deserialize, Serialize};

/// What the walker does with an entry it cannot list or stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkErrorPolicy {
    /// Stop at the first unreadable entry and surface the error
    #[default]
    Abort,
    /// Log the unreadable entry and keep summing the rest
    Skip,
}

/// Size cache configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeCacheConfig {
    /// Policy for unreadable entries below the root
    #[serde(default)]
    pub walk_error_policy: WalkErrorPolicy,
}

impl SizeCacheConfig {
    /// Abort on the first unreadable entry
    pub fn strict() -> Self {
        Self {
            walk_error_policy: WalkErrorPolicy::Abort,
        }
    }

    /// Skip unreadable entries
    pub fn lenient() -> Self {
        Self {
            walk_error_policy: WalkErrorPolicy::Skip,
        }
    }

    /// Whether unreadable entries are skipped
    pub fn skips_unreadable(&self) -> bool {
        self.walk_error_policy == WalkErrorPolicy::Skip
    }
}
