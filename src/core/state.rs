//! Navigation run states.
//!
//! ```text
//! Idle -> Validating -> Fetching -> Swapping -> Finalizing -> Idle
//!             \            \           \            \
//!              +------------+-----------+------------+--> Aborted
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavState {
    Idle,
    /// Resolving the target and checking origin and capabilities.
    Validating,
    /// Retrieving the destination document.
    Fetching,
    /// Running the synchronous DOM update inside the transition.
    Swapping,
    /// Waiting for the transition to settle, then reattaching behavior.
    Finalizing,
    /// Terminal: fell back to a full navigation, was abandoned or superseded.
    Aborted,
}

impl NavState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_enter(self, next: Self) -> bool {
        use NavState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Fetching)
                | (Fetching, Swapping)
                | (Swapping, Finalizing)
                | (Finalizing, Idle)
                | (Validating | Fetching | Swapping | Finalizing, Aborted)
        )
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Idle | Self::Aborted)
    }
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Fetching => "fetching",
            Self::Swapping => "swapping",
            Self::Finalizing => "finalizing",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
