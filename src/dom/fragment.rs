//! Detached trees parsed from fetched pages.
//!
//! A `Fragment` never shares nodes with the live [`Document`](super::Document):
//! content moves into the page only through [`Document::import`](super::Document::import),
//! which deep-copies it.

use super::html;
use super::node::{Attrs, attr};
use super::selector::Selector;

/// Element of a detached fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentElement {
    pub tag: String,
    pub attrs: Attrs,
    pub children: Vec<FragmentNode>,
}

impl FragmentElement {
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&str> {
        attr(&self.attrs, name)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Children wrapped as a standalone fragment.
    pub fn to_fragment(&self) -> Fragment {
        Fragment {
            nodes: self.children.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element(FragmentElement),
    Text(String),
}

/// Ordered list of detached top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub nodes: Vec<FragmentNode>,
}

impl Fragment {
    pub fn new(nodes: Vec<FragmentNode>) -> Self {
        Self { nodes }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element (preorder) matching the selector.
    pub fn find(&self, selector: &Selector) -> Option<&FragmentElement> {
        self.find_all(selector).into_iter().next()
    }

    /// All elements (preorder) matching the selector.
    pub fn find_all(&self, selector: &Selector) -> Vec<&FragmentElement> {
        let mut found = Vec::new();
        let mut chain = Vec::new();
        walk(&self.nodes, &mut chain, &mut |element, chain| {
            if selector.matches(chain) {
                found.push(element);
            }
        });
        found
    }

    /// Whether any element exists in the fragment.
    pub fn has_elements(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, FragmentNode::Element(_)))
    }

    /// Serialize the fragment's nodes.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        write_nodes(&self.nodes, None, &mut out);
        out
    }
}

// =============================================================================
// Traversal
// =============================================================================

fn walk<'a, F>(nodes: &'a [FragmentNode], chain: &mut Vec<(&'a str, &'a Attrs)>, visit: &mut F)
where
    F: FnMut(&'a FragmentElement, &[(&'a str, &'a Attrs)]),
{
    for node in nodes {
        if let FragmentNode::Element(element) = node {
            chain.push((element.tag.as_str(), &element.attrs));
            visit(element, chain);
            walk(&element.children, chain, visit);
            chain.pop();
        }
    }
}

fn collect_text(nodes: &[FragmentNode], out: &mut String) {
    for node in nodes {
        match node {
            FragmentNode::Text(text) => out.push_str(text),
            FragmentNode::Element(element) => collect_text(&element.children, out),
        }
    }
}

fn write_nodes(nodes: &[FragmentNode], parent_tag: Option<&str>, out: &mut String) {
    for node in nodes {
        match node {
            FragmentNode::Text(text) => html::text(out, text, parent_tag),
            FragmentNode::Element(element) => {
                html::open_tag(out, &element.tag, &element.attrs);
                write_nodes(&element.children, Some(&element.tag), out);
                html::close_tag(out, &element.tag);
            }
        }
    }
}

/// Whether the node nests deeper than `limit` levels (a leaf is one level).
///
/// Stops descending as soon as the limit is crossed.
pub(super) fn exceeds_depth(node: &FragmentNode, limit: usize) -> bool {
    if limit == 0 {
        return true;
    }
    match node {
        FragmentNode::Text(_) => false,
        FragmentNode::Element(element) => element
            .children
            .iter()
            .any(|child| exceeds_depth(child, limit - 1)),
    }
}
