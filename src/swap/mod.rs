//! Region reconciliation.
//!
//! A region keeps its container node for the lifetime of the page; a swap
//! only replaces the container's children. The sticky element (the theme
//! toggle) is lifted out before the children are freed and put back
//! afterwards, so its listeners survive.

use thiserror::Error;

use crate::dom::{Document, Fragment, ImportError, NodeId, Selector};

/// A live region resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRegion {
    pub name: String,
    pub selector: Selector,
    pub container: NodeId,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("region container {container} is not attached to the document")]
    Detached { container: NodeId },

    #[error("fragment nests deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

impl From<ImportError> for ReconcileError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::DepthExceeded { limit } => Self::DepthExceeded { limit },
        }
    }
}

/// Replace the children of `container` with deep copies of `fragment`.
///
/// On import failure the container keeps whatever was imported so far and
/// the error propagates; the sticky element is restored either way.
pub fn reconcile(
    doc: &mut Document,
    container: NodeId,
    fragment: &Fragment,
    sticky_id: Option<&str>,
) -> Result<(), ReconcileError> {
    if !doc.is_attached(container) {
        return Err(ReconcileError::Detached { container });
    }

    let sticky = sticky_id
        .filter(|id| !id.is_empty())
        .and_then(|id| doc.find_by_id(container, id).map(|node| (id, node)));
    if let Some((_, node)) = sticky {
        doc.detach(node);
    }

    doc.clear_children(container);
    let imported = doc.import_fragment(container, fragment);

    if let Some((id, node)) = sticky {
        if doc.find_by_id(container, id).is_none() {
            doc.append_child(container, node);
        } else {
            // Incoming content brought its own copy
            doc.remove(node);
        }
    }

    imported.map_err(ReconcileError::from)
}
