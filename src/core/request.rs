//! Navigation intents and region registrations.

use crate::dom::Selector;

/// A single navigation intent, consumed by one controller run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Absolute or relative locator, exactly as written in the link.
    pub target: String,
    /// `true` for link activation, `false` for history pops (the browser
    /// already moved the cursor, so the entry is replaced instead).
    pub should_push_history: bool,
}

impl NavigationRequest {
    /// Request created by link activation.
    pub fn push(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            should_push_history: true,
        }
    }

    /// Request created by a history pop.
    pub fn pop(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            should_push_history: false,
        }
    }
}

/// A region participating in reconciliation, as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    /// Region name (`main`, `header`, `footer`...).
    pub name: String,
    /// Locates the container in both the live and the fetched page.
    pub selector: Selector,
    /// The fetched page must expose this region to be swapped in.
    pub primary: bool,
}

impl RegionSpec {
    pub fn new(name: impl Into<String>, selector: Selector, primary: bool) -> Self {
        Self {
            name: name.into(),
            selector,
            primary,
        }
    }
}
