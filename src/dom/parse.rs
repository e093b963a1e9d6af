//! HTML parsing into detached fragments (via `tl`).

use thiserror::Error;

use super::fragment::{Fragment, FragmentElement, FragmentNode};
use super::html::unescape;
use super::node::Attrs;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid markup: {0}")]
pub struct HtmlError(pub String);

/// Parse an HTML document or snippet into a detached fragment.
///
/// Comments, doctypes and whitespace-only text are dropped. Tag and
/// attribute names are lowercased; text and attribute values are unescaped.
pub fn parse_html(html: &str) -> Result<Fragment, HtmlError> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|e| HtmlError(format!("{e:?}")))?;

    let parser = dom.parser();
    let nodes = dom
        .children()
        .iter()
        .filter_map(|handle| convert(*handle, parser))
        .collect();
    Ok(Fragment::new(nodes))
}

/// Convert a tl node handle to a fragment node
fn convert(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<FragmentNode> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();
            if tag_name.starts_with('!') {
                return None;
            }

            let mut attrs = Attrs::new();
            for (key, value) in tag.attributes().iter() {
                let key: &str = key.as_ref();
                let value = value.map(|v| unescape(&v).into_owned()).unwrap_or_default();
                attrs.push((key.to_ascii_lowercase(), value));
            }

            let children = tag
                .children()
                .top()
                .iter()
                .filter_map(|child| convert(*child, parser))
                .collect();

            Some(FragmentNode::Element(FragmentElement {
                tag: tag_name,
                attrs,
                children,
            }))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            // Skip whitespace-only text
            if text.trim().is_empty() {
                None
            } else {
                Some(FragmentNode::Text(unescape(&text).into_owned()))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
