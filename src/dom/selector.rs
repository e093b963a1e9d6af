//! Minimal CSS selectors.
//!
//! Supports compound simple selectors (`a`, `#id`, `.class`, `nav.primary`,
//! `*`) joined by the descendant combinator (`header nav a`). That covers
//! region containers and link scopes without pulling in a CSS engine.

use smallvec::SmallVec;
use thiserror::Error;

use super::node::{Attrs, attr};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported character `{ch}` in selector `{selector}`")]
    Unsupported { selector: String, ch: char },
    #[error("dangling `{marker}` in selector `{selector}`")]
    Dangling { selector: String, marker: char },
}

/// A single compound selector (`nav.primary#top`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
}

impl Compound {
    fn parse(token: &str, selector: &str) -> Result<Self, SelectorError> {
        let mut compound = Self::default();
        let mut rest = token;

        // Leading tag name or universal selector
        let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if tag != "*" && !tag.is_empty() {
            check_ident(tag, selector)?;
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return Err(SelectorError::Dangling {
                    selector: selector.to_string(),
                    marker,
                });
            }
            check_ident(name, selector)?;
            match marker {
                '#' => compound.id = Some(name.to_string()),
                _ => compound.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        Ok(compound)
    }

    fn matches(&self, tag: &str, attrs: &Attrs) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &self.id
            && attr(attrs, "id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_list = attr(attrs, "class").unwrap_or_default();
            return self
                .classes
                .iter()
                .all(|class| class_list.split_ascii_whitespace().any(|c| c == class));
        }
        true
    }
}

fn check_ident(name: &str, selector: &str) -> Result<(), SelectorError> {
    match name
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_')))
    {
        Some(ch) => Err(SelectorError::Unsupported {
            selector: selector.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

/// Descendant chain of compound selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    parts: SmallVec<[Compound; 3]>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let parts = source
            .split_ascii_whitespace()
            .map(|token| Compound::parse(token, source))
            .collect::<Result<SmallVec<[Compound; 3]>, _>>()?;
        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self {
            source: source.trim().to_string(),
            parts,
        })
    }

    /// Selector matching a single tag name.
    pub fn tag(tag: &str) -> Self {
        Self {
            source: tag.to_string(),
            parts: SmallVec::from_elem(
                Compound {
                    tag: Some(tag.to_ascii_lowercase()),
                    ..Compound::default()
                },
                1,
            ),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match against an element given its ancestor chain.
    ///
    /// `chain` runs from the outermost ancestor to the element itself; each
    /// entry is `(tag, attrs)`. Descendant combinators are matched greedily
    /// from the nearest ancestor outwards.
    pub fn matches(&self, chain: &[(&str, &Attrs)]) -> bool {
        let Some(((tag, attrs), ancestors)) = chain.split_last() else {
            return false;
        };
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(tag, attrs) {
            return false;
        }

        let mut ancestors = ancestors.iter().rev();
        rest.iter()
            .rev()
            .all(|part| ancestors.any(|(tag, attrs)| part.matches(tag, attrs)))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("a[href]"),
            Err(SelectorError::Unsupported { ch: '[', .. })
        ));
        assert!(matches!(
            Selector::parse("nav."),
            Err(SelectorError::Dangling { marker: '.', .. })
        ));
        assert!(matches!(
            Selector::parse("header > a"),
            Err(SelectorError::Unsupported { ch: '>', .. })
        ));
    }

    #[test]
    fn test_simple_matches() {
        let empty = Attrs::new();
        let main = Selector::parse("main").unwrap();
        assert!(main.matches(&[("main", &empty)]));
        assert!(!main.matches(&[("div", &empty)]));

        let by_id = Selector::parse("#theme-toggle").unwrap();
        let toggle = attrs(&[("id", "theme-toggle")]);
        assert!(by_id.matches(&[("button", &toggle)]));
        assert!(!by_id.matches(&[("button", &empty)]));

        let any = Selector::parse("*").unwrap();
        assert!(any.matches(&[("span", &empty)]));
    }

    #[test]
    fn test_class_matches() {
        let selector = Selector::parse("nav.primary.wide").unwrap();
        let both = attrs(&[("class", "wide  primary")]);
        let one = attrs(&[("class", "primary")]);
        assert!(selector.matches(&[("nav", &both)]));
        assert!(!selector.matches(&[("nav", &one)]));
        assert!(!selector.matches(&[("div", &both)]));
    }

    #[test]
    fn test_descendant_matches() {
        let empty = Attrs::new();
        let selector = Selector::parse("header nav a").unwrap();

        let chain = [
            ("html", &empty),
            ("header", &empty),
            ("div", &empty),
            ("nav", &empty),
            ("a", &empty),
        ];
        assert!(selector.matches(&chain));

        // nav outside header
        let chain = [("nav", &empty), ("header", &empty), ("a", &empty)];
        assert!(!selector.matches(&chain));

        // anchor in main
        let chain = [("main", &empty), ("a", &empty)];
        assert!(!selector.matches(&chain));
    }

    #[test]
    fn test_tag_constructor_and_display() {
        let selector = Selector::tag("MAIN");
        let empty = Attrs::new();
        assert!(selector.matches(&[("main", &empty)]));
        assert_eq!(Selector::parse(" header nav a ").unwrap().to_string(), "header nav a");
    }
}
