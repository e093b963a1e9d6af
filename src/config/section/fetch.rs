//! `[nav.fetch]` configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Page retrieval configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in milliseconds (0 disables the bound).
    pub timeout: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10_000 }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_millis(self.timeout))
    }
}
