//! `[nav.preload]` configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Preload/prefetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    /// Enable hover-based prefetching.
    pub enable: bool,

    /// Delay in milliseconds before prefetching (to avoid false triggers).
    pub delay: u32,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            enable: false,
            delay: 100,
        }
    }
}

impl PreloadConfig {
    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay))
    }
}
