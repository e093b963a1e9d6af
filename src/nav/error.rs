//! Navigation errors.

use thiserror::Error;
use url::Url;

use crate::fetch::FetchError;
use crate::swap::ReconcileError;

/// Why a navigation could not complete as a swap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("invalid navigation target `{target}`")]
    InvalidTarget {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{0} is not on the current origin")]
    OriginMismatch(Url),

    #[error("SPA navigation is disabled")]
    Disabled,

    #[error("no tracked regions on this page (controller not started?)")]
    NotStarted,

    #[error("host does not support view transitions")]
    UnsupportedFeature,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("fetched page has no `{0}` region")]
    MissingRegion(String),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl NavError {
    /// Whether a full document navigation recovers from this error.
    ///
    /// A failed reconcile has already touched the document, so reloading
    /// is left to the user.
    #[inline]
    pub fn falls_back(&self) -> bool {
        !matches!(self, Self::Reconcile(_))
    }
}
