//! Node handles and node payloads for the arena document.

use std::fmt;

use smallvec::SmallVec;

/// Element attributes in source order.
pub type Attrs = SmallVec<[(String, String); 4]>;

/// Look up an attribute value by name.
#[inline]
pub fn attr<'a>(attrs: &'a Attrs, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Handle to a node in a [`Document`](super::Document).
///
/// The generation makes handles to freed nodes detectable: once a node is
/// removed its slot may be reused, but old handles stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root (not an element).
    Root,
    Element { tag: String, attrs: Attrs },
    Text(String),
}

/// Event listeners the navigation layer attaches to live elements.
///
/// Listeners live on the node: freeing a node drops them, which is how
/// replaced content loses its handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Click handler routing the link through the navigation controller.
    NavClick,
    /// Hover handler that preloads the link target.
    Preload,
    /// Click handler of the theme toggle control.
    ThemeToggle,
}

#[derive(Debug)]
pub(super) struct Node {
    pub(super) data: NodeData,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) listeners: SmallVec<[Listener; 2]>,
}

impl Node {
    pub(super) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            listeners: SmallVec::new(),
        }
    }
}

#[derive(Debug)]
pub(super) struct Slot {
    pub(super) generation: u32,
    pub(super) node: Option<Node>,
}
