//! HTML utility functions.
//!
//! Provides the HTML processing shared by the live document and fetched
//! fragments:
//! - `escape()`, `escape_attr()`, `unescape()` - HTML entity handling
//! - `is_void_element()` - Self-closing elements (br, img, etc.)
//! - `is_raw_text_element()` - Raw text elements (script, style)
//! - `open_tag()`, `close_tag()` - serialization helpers

use std::borrow::Cow;

use super::node::Attrs;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Escape text content (`<`, `>`, `&`).
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_where(s, |c| matches!(c, '<' | '>' | '&'))
}

/// Escape a double-quoted attribute value (`&`, `"`, `<`, `>`, `'`).
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_where(s, |c| matches!(c, '<' | '>' | '&' | '"' | '\''))
}

/// Borrows when nothing matches `special`.
fn escape_where(s: &str, special: impl Fn(char) -> bool) -> Cow<'_, str> {
    let Some(first) = s.find(&special) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        if !special(c) {
            out.push(c);
            continue;
        }
        out.push_str(match c {
            '<' => "&lt;",
            '>' => "&gt;",
            '&' => "&amp;",
            '"' => "&quot;",
            _ => "&#39;",
        });
    }
    Cow::Owned(out)
}

/// Unescape HTML entities back to characters.
///
/// Handles common named entities and numeric character references.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }

        let mut entity = String::new();
        let mut terminated = false;
        while let Some(&next) = chars.peek() {
            if next == ';' {
                chars.next();
                terminated = true;
                break;
            }
            if next == '&' || next.is_whitespace() || entity.len() > 10 {
                break;
            }
            entity.push(next);
            chars.next();
        }

        if !terminated {
            result.push('&');
            result.push_str(&entity);
            continue;
        }

        match entity.as_str() {
            "lt" => result.push('<'),
            "gt" => result.push('>'),
            "amp" => result.push('&'),
            "quot" => result.push('"'),
            "apos" => result.push('\''),
            "nbsp" => result.push('\u{00A0}'),
            s if s.starts_with('#') => {
                let code = if s.starts_with("#x") || s.starts_with("#X") {
                    u32::from_str_radix(&s[2..], 16).ok()
                } else {
                    s[1..].parse().ok()
                };
                match code.and_then(char::from_u32) {
                    Some(c) => result.push(c),
                    None => {
                        result.push('&');
                        result.push_str(&entity);
                        result.push(';');
                    }
                }
            }
            _ => {
                result.push('&');
                result.push_str(&entity);
                result.push(';');
            }
        }
    }

    Cow::Owned(result)
}

// =============================================================================
// Element Classification
// =============================================================================

/// Check if an HTML tag is a void element (self-closing).
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Check if tag is a raw text element (content should not be HTML-escaped).
#[inline]
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

// =============================================================================
// Serialization
// =============================================================================

/// Write `<tag attr="value">`. Empty values are written as bare attributes.
pub fn open_tag(out: &mut String, tag: &str, attrs: &Attrs) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    out.push('>');
}

/// Write `</tag>` unless the element is void.
pub fn close_tag(out: &mut String, tag: &str) {
    if is_void_element(tag) {
        return;
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Write a text node, escaped unless it sits inside script/style.
pub fn text(out: &mut String, content: &str, parent_tag: Option<&str>) {
    if parent_tag.is_some_and(is_raw_text_element) {
        out.push_str(content);
    } else {
        out.push_str(&escape(content));
    }
}

// =============================================================================
// Tests
// =============================================================================
