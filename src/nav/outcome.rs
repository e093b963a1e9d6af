//! Run results.

use url::Url;

use super::NavError;
use crate::core::NavState;
use crate::swap::ReconcileError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Regions swapped, history updated, scripts and links reattached.
    Completed { url: Url },
    /// Gave up before touching the document; `Window::assign(target)` was called.
    FellBack { target: String, reason: NavError },
    /// Reconcile failed mid-swap; the document is left as is.
    Abandoned(ReconcileError),
    /// A newer run took over (`latest` policy).
    Superseded,
}

/// What one `navigate` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavReport {
    /// Monotonic run number.
    pub generation: u64,
    /// Every state the run visited, starting with `Idle`.
    pub trace: Vec<NavState>,
    pub outcome: NavOutcome,
}

impl NavReport {
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, NavOutcome::Completed { .. })
    }

    #[inline]
    pub fn fell_back(&self) -> bool {
        matches!(self.outcome, NavOutcome::FellBack { .. })
    }

    /// Last state reached.
    pub fn state(&self) -> NavState {
        self.trace.last().copied().unwrap_or(NavState::Idle)
    }
}
