//! Host environment capabilities.
//!
//! The controller never talks to a browser directly. Everything it needs
//! from the page's environment goes through [`Window`]:
//!
//! - current location and history (`push_state` / `replace_state`)
//! - full navigation (`assign`), the universal fallback
//! - the view-transition primitive and its finished signal
//! - deferred script execution

use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("view transition failed: {0}")]
    Failed(String),

    #[error("view transition dropped its finished signal")]
    Dropped,
}

/// Completion handle returned by [`Window::start_view_transition`].
#[derive(Debug)]
pub struct Finished(oneshot::Receiver<Result<(), TransitionError>>);

/// Sending half of [`Finished`], kept by the host until the animation ends.
#[derive(Debug)]
pub struct FinishSignal(oneshot::Sender<Result<(), TransitionError>>);

impl Finished {
    pub fn channel() -> (FinishSignal, Finished) {
        let (tx, rx) = oneshot::channel();
        (FinishSignal(tx), Finished(rx))
    }

    /// A transition that has already settled.
    pub fn ready() -> Self {
        let (signal, finished) = Self::channel();
        signal.finish();
        finished
    }

    /// Wait for the animation to settle.
    pub async fn wait(self) -> Result<(), TransitionError> {
        self.0.await.unwrap_or(Err(TransitionError::Dropped))
    }
}

impl FinishSignal {
    pub fn finish(self) {
        // Receiver gone means nobody waits anymore
        let _ = self.0.send(Ok(()));
    }

    pub fn fail(self, reason: impl Into<String>) {
        let _ = self.0.send(Err(TransitionError::Failed(reason.into())));
    }
}

/// The environment a [`Controller`](crate::Controller) runs in.
pub trait Window: Send + Sync {
    /// Current document URL.
    fn location(&self) -> Url;

    /// Add a history entry and make it current.
    fn push_state(&self, url: &Url);

    /// Replace the current history entry.
    fn replace_state(&self, url: &Url);

    /// Full document navigation. Never fails from the controller's view.
    fn assign(&self, target: &str);

    fn supports_view_transitions(&self) -> bool;

    /// Run `update` synchronously inside a view transition lasting
    /// `duration`.
    fn start_view_transition(&self, duration: Duration, update: &mut dyn FnMut()) -> Finished;

    /// Execute an external script (deferred, in call order).
    fn run_script(&self, src: &Url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_is_finished() {
        assert_eq!(Finished::ready().wait().await, Ok(()));
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let (signal, finished) = Finished::channel();
        signal.fail("interrupted");
        assert_eq!(
            finished.wait().await,
            Err(TransitionError::Failed("interrupted".into()))
        );
    }

    #[tokio::test]
    async fn test_dropped_signal() {
        let (signal, finished) = Finished::channel();
        drop(signal);
        assert_eq!(finished.wait().await, Err(TransitionError::Dropped));
    }
}
