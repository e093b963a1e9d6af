//! `[nav.transition]` configuration.
//!
//! # Example
//!
//! ```toml
//! [nav.transition]
//! style = "fade"
//! time = 200
//! timeout = 5000
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// View transition configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Transition style: "none" or "fade".
    /// Setting to "fade" requires the host's view-transition primitive.
    pub style: TransitionStyle,

    /// Transition duration in milliseconds.
    pub time: u32,

    /// Upper bound in milliseconds for the finished signal (0 waits forever).
    pub timeout: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            style: TransitionStyle::Fade,
            time: 200,
            timeout: 5000,
        }
    }
}

impl TransitionConfig {
    /// Returns true if view transitions are enabled (style != None).
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.style != TransitionStyle::None
    }

    /// Animation length handed to the host.
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.time))
    }

    /// Finished-signal bound, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_millis(self.timeout))
    }
}

/// Transition style for page navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStyle {
    /// No transition animation (instant swap).
    None,

    /// Fade transition through the host's view-transition primitive.
    #[default]
    Fade,
}
