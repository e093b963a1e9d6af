//! Per-navigation state tracking.

use super::{NavOutcome, NavReport};
use crate::core::NavState;
use crate::debug;

/// One pass through the state machine.
#[derive(Debug)]
pub(super) struct Run {
    pub generation: u64,
    trace: Vec<NavState>,
}

impl Run {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            trace: vec![NavState::Idle],
        }
    }

    #[inline]
    pub fn state(&self) -> NavState {
        self.trace.last().copied().unwrap_or(NavState::Idle)
    }

    pub fn enter(&mut self, next: NavState) {
        let from = self.state();
        debug_assert!(from.can_enter(next), "illegal transition {from} -> {next}");
        debug!("nav"; "#{} {} -> {}", self.generation, from, next);
        self.trace.push(next);
    }

    pub fn finish(self, outcome: NavOutcome) -> NavReport {
        NavReport {
            generation: self.generation,
            trace: self.trace,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_starts_idle() {
        let mut run = Run::new(7);
        run.enter(NavState::Validating);
        run.enter(NavState::Aborted);
        let report = run.finish(NavOutcome::Superseded);

        assert_eq!(report.generation, 7);
        assert_eq!(
            report.trace,
            [NavState::Idle, NavState::Validating, NavState::Aborted]
        );
        assert_eq!(report.state(), NavState::Aborted);
    }
}
