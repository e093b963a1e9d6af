//! Arena-backed live document.
//!
//! Nodes live in generation-tagged slots. Removing a subtree frees its slots
//! and drops every listener attached inside it, so stale `NodeId`s simply
//! stop resolving instead of pointing at reused nodes.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use super::fragment::{Fragment, FragmentNode, exceeds_depth};
use super::html;
use super::node::{Attrs, Listener, Node, NodeData, NodeId, Slot, attr};
use super::parse::{HtmlError, parse_html};
use super::selector::Selector;

/// Maximum nesting depth accepted by [`Document::import`].
pub const MAX_IMPORT_DEPTH: usize = 512;

/// Live document shared between the controller and its host.
pub type SharedDocument = Arc<Mutex<Document>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("fragment nests deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error(transparent)]
    Html(#[from] HtmlError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document (root only).
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        doc.root = doc.alloc(NodeData::Root);
        doc
    }

    /// Build a live document from markup.
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        let fragment = parse_html(markup)?;
        let mut doc = Self::new();
        let root = doc.root;
        for node in &fragment.nodes {
            let id = doc.import(node)?;
            doc.append_child(root, id);
        }
        Ok(doc)
    }

    /// Wrap into the shared handle used by the controller.
    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element, or the root for bodyless documents.
    pub fn body(&self) -> NodeId {
        self.query(self.root, &Selector::tag("body"))
            .unwrap_or(self.root)
    }

    // =========================================================================
    // Slot management
    // =========================================================================

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let node = Node::new(data);
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Free a node and its whole subtree. The node must already be detached.
    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
            }
        }
    }

    /// Number of live nodes (including the root).
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Whether the document only holds its root.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    // =========================================================================
    // Node creation and tree mutation
    // =========================================================================

    pub fn create_element(&mut self, tag: &str, attrs: Attrs) -> NodeId {
        self.alloc(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attrs,
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere. Returns false if either node is gone or the move would
    /// create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || self.is_inclusive_ancestor(child, parent)
        {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Unlink a node from its parent, keeping it (and its listeners) alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|child| *child != id);
        }
    }

    /// Detach and free a node with its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    /// Free every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = match self.node_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
            self.free_subtree(child);
        }
    }

    /// Deep-copy a detached fragment node into this document.
    ///
    /// The returned node is not attached anywhere yet.
    pub fn import(&mut self, node: &FragmentNode) -> Result<NodeId, ImportError> {
        if exceeds_depth(node, MAX_IMPORT_DEPTH) {
            return Err(ImportError::DepthExceeded {
                limit: MAX_IMPORT_DEPTH,
            });
        }
        Ok(self.import_unchecked(node))
    }

    fn import_unchecked(&mut self, node: &FragmentNode) -> NodeId {
        match node {
            FragmentNode::Text(text) => self.create_text(text.clone()),
            FragmentNode::Element(element) => {
                let id = self.create_element(&element.tag, element.attrs.clone());
                for child in &element.children {
                    let child = self.import_unchecked(child);
                    self.append_child(id, child);
                }
                id
            }
        }
    }

    /// Import every node of a fragment under `parent`, in order.
    pub fn import_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> Result<(), ImportError> {
        for node in &fragment.nodes {
            let id = self.import(node)?;
            self.append_child(parent, id);
        }
        Ok(())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[inline]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Whether the node is connected to the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.node(node_id).and_then(|node| node.parent);
        }
        false
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.node(node_id).and_then(|node| node.parent);
        }
        false
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|node| &node.data)
    }

    /// Tag name for element nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attrs(&self, id: NodeId) -> Option<&Attrs> {
        match self.data(id)? {
            NodeData::Element { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id).and_then(|attrs| attr(attrs, name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(Node {
            data: NodeData::Element { attrs, .. },
            ..
        }) = self.node_mut(id)
        else {
            return;
        };
        match attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Descendants of `id` in preorder (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Element ancestry from the outermost element down to `id`.
    fn element_chain(&self, id: NodeId) -> Vec<(&str, &Attrs)> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.node(node_id) else {
                break;
            };
            if let NodeData::Element { tag, attrs } = &node.data {
                chain.push((tag.as_str(), attrs));
            }
            current = node.parent;
        }
        chain.reverse();
        chain
    }

    /// Whether the element matches the selector (ancestors included).
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.tag(id).is_some() && selector.matches(&self.element_chain(id))
    }

    /// First descendant of `scope` matching the selector.
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    /// All descendants of `scope` matching the selector, in document order.
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    /// Nearest inclusive ancestor with the given tag.
    pub fn closest_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if self.tag(node_id) == Some(tag) {
                return Some(node_id);
            }
            current = self.parent(node_id);
        }
        None
    }

    /// First attached element carrying `id="value"`.
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        self.find_by_id(self.root, value)
    }

    /// First descendant of `scope` carrying `id="value"`.
    pub fn find_by_id(&self, scope: NodeId, value: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.attr(*id, "id") == Some(value))
    }

    /// Number of descendants of `scope` carrying `id="value"`.
    pub fn count_by_id(&self, scope: NodeId, value: &str) -> usize {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.attr(*id, "id") == Some(value))
            .count()
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node_id in std::iter::once(id).chain(self.descendants(id)) {
            if let Some(NodeData::Text(text)) = self.data(node_id) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    // =========================================================================
    // Title
    // =========================================================================

    /// Text of the first `<title>` element.
    pub fn title(&self) -> String {
        self.query(self.root, &Selector::tag("title"))
            .map(|id| self.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Set the title, creating `<title>` in `<head>` (or the root) if needed.
    pub fn set_title(&mut self, title: &str) {
        let element = match self.query(self.root, &Selector::tag("title")) {
            Some(id) => id,
            None => {
                let parent = self
                    .query(self.root, &Selector::tag("head"))
                    .unwrap_or(self.root);
                let id = self.create_element("title", Attrs::new());
                self.append_child(parent, id);
                id
            }
        };
        self.set_text_content(element, title);
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Attach a listener; returns false if already attached or the node is gone.
    pub fn add_listener(&mut self, id: NodeId, listener: Listener) -> bool {
        match self.node_mut(id) {
            Some(node) if !node.listeners.contains(&listener) => {
                node.listeners.push(listener);
                true
            }
            _ => false,
        }
    }

    pub fn remove_listener(&mut self, id: NodeId, listener: Listener) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|l| *l != listener);
        node.listeners.len() != before
    }

    pub fn has_listener(&self, id: NodeId, listener: Listener) -> bool {
        self.node(id)
            .is_some_and(|node| node.listeners.contains(&listener))
    }

    /// Count attached nodes carrying the listener.
    pub fn listener_count(&self, listener: Listener) -> usize {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.has_listener(*id, listener))
            .count()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let parent_tag = self.tag(id);
        for child in self.children(id) {
            self.write_node(*child, parent_tag, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let parent_tag = self.parent(id).and_then(|parent| self.tag(parent));
        self.write_node(id, parent_tag, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, parent_tag: Option<&str>, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Text(text)) => html::text(out, text, parent_tag),
            Some(NodeData::Element { tag, attrs }) => {
                html::open_tag(out, tag, attrs);
                for child in self.children(id) {
                    self.write_node(*child, Some(tag), out);
                }
                html::close_tag(out, tag);
            }
            Some(NodeData::Root) => {
                for child in self.children(id) {
                    self.write_node(*child, None, out);
                }
            }
            None => {}
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::FragmentElement;

    const PAGE: &str = r#"<html><head><title>Home</title></head><body>
        <header><nav><a href="/about">About</a></nav><button id="theme-toggle">D</button></header>
        <main><p>Welcome</p></main>
        <footer>(c)</footer>
        </body></html>"#;

    #[test]
    fn test_parse_and_query() {
        let doc = Document::parse(PAGE).unwrap();
        assert_eq!(doc.title(), "Home");

        let main = doc.query(doc.root(), &Selector::tag("main")).unwrap();
        assert_eq!(doc.inner_html(main), "<p>Welcome</p>");

        let links = doc.query_all(doc.root(), &Selector::parse("header nav a").unwrap());
        assert_eq!(links.len(), 1);
        assert_eq!(doc.attr(links[0], "href"), Some("/about"));

        assert!(doc.element_by_id("theme-toggle").is_some());
        assert_eq!(doc.tag(doc.body()), Some("body"));
    }

    #[test]
    fn test_removed_nodes_stop_resolving() {
        let mut doc = Document::parse(PAGE).unwrap();
        let main = doc.query(doc.root(), &Selector::tag("main")).unwrap();
        let paragraph = doc.children(main)[0];

        doc.add_listener(paragraph, Listener::NavClick);
        doc.clear_children(main);

        assert!(!doc.is_alive(paragraph));
        assert!(!doc.has_listener(paragraph, Listener::NavClick));
        assert!(doc.children(main).is_empty());

        // Slot reuse must not revive the old handle
        let fresh = doc.create_element("p", Attrs::new());
        assert_ne!(fresh, paragraph);
        assert!(!doc.is_alive(paragraph));
    }

    #[test]
    fn test_detach_keeps_node_alive() {
        let mut doc = Document::parse(PAGE).unwrap();
        let toggle = doc.element_by_id("theme-toggle").unwrap();
        doc.add_listener(toggle, Listener::ThemeToggle);

        doc.detach(toggle);
        assert!(doc.is_alive(toggle));
        assert!(!doc.is_attached(toggle));
        assert!(doc.element_by_id("theme-toggle").is_none());
        assert!(doc.has_listener(toggle, Listener::ThemeToggle));

        let footer = doc.query(doc.root(), &Selector::tag("footer")).unwrap();
        assert!(doc.append_child(footer, toggle));
        assert!(doc.is_attached(toggle));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div", Attrs::new());
        let inner = doc.create_element("span", Attrs::new());
        assert!(doc.append_child(outer, inner));
        assert!(!doc.append_child(inner, outer));
        assert!(!doc.append_child(outer, outer));
    }

    #[test]
    fn test_set_title_creates_element() {
        let mut doc = Document::parse("<html><head></head><body></body></html>").unwrap();
        assert_eq!(doc.title(), "");
        doc.set_title("About");
        assert_eq!(doc.title(), "About");
        doc.set_title("Contact");
        assert_eq!(doc.title(), "Contact");
        assert_eq!(
            doc.query_all(doc.root(), &Selector::tag("title")).len(),
            1
        );
    }

    #[test]
    fn test_import_depth_limit() {
        let mut node = FragmentNode::Text("leaf".into());
        for _ in 0..MAX_IMPORT_DEPTH {
            node = FragmentNode::Element(FragmentElement {
                tag: "div".into(),
                attrs: Attrs::new(),
                children: vec![node],
            });
        }

        let mut doc = Document::new();
        let before = doc.len();
        assert_eq!(
            doc.import(&node),
            Err(ImportError::DepthExceeded {
                limit: MAX_IMPORT_DEPTH
            })
        );
        assert_eq!(doc.len(), before);
    }

    #[test]
    fn test_serialization_roundtrip_shape() {
        let doc = Document::parse(r#"<div class="a"><img src="x.png"><p>1 &lt; 2</p></div>"#).unwrap();
        assert_eq!(
            doc.inner_html(doc.root()),
            r#"<div class="a"><img src="x.png"><p>1 &lt; 2</p></div>"#
        );
    }
}
