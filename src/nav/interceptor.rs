//! Link interception.
//!
//! Eligible links carry a [`Listener::NavClick`] listener (and
//! [`Listener::Preload`] when preloading is on). Listeners live on the
//! nodes, so links swapped out with a region lose them automatically and
//! [`NavigationInterceptor::rebind`] restores them on the new content.

use url::Url;

use crate::core::{LinkKind, NavigationRequest, PopLocation, is_same_origin, resolve};
use crate::dom::{Document, Listener, NodeId, Selector};

/// Pointer activation as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickEvent {
    /// `0` is the primary button.
    pub button: i16,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ClickEvent {
    /// Plain primary-button click.
    pub fn primary() -> Self {
        Self::default()
    }

    /// Primary button, no modifier keys.
    #[inline]
    pub fn is_plain_primary(&self) -> bool {
        self.button == 0 && !(self.meta || self.ctrl || self.shift || self.alt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Let the host perform its default action.
    Default,
    /// Default prevented; run this navigation.
    Navigate(NavigationRequest),
}

#[derive(Debug, Clone)]
pub struct NavigationInterceptor {
    links: Selector,
    preload: bool,
}

impl NavigationInterceptor {
    pub fn new(links: Selector, preload: bool) -> Self {
        Self { links, preload }
    }

    /// Whether `node` is a link the controller should take over.
    pub fn is_eligible(doc: &Document, node: NodeId, location: &Url) -> bool {
        if doc.tag(node) != Some("a") {
            return false;
        }
        let Some(href) = doc.attr(node, "href") else {
            return false;
        };
        if !LinkKind::parse(href).is_navigational() {
            return false;
        }
        if let Some(target) = doc.attr(node, "target")
            && !target.is_empty()
            && !target.eq_ignore_ascii_case("_self")
        {
            return false;
        }
        if doc.attr(node, "download").is_some() {
            return false;
        }

        resolve(location, href).is_ok_and(|url| {
            is_same_origin(location, &url) && matches!(url.scheme(), "http" | "https")
        })
    }

    /// Attach listeners to eligible links under `scope`. Returns how many
    /// links are bound afterwards.
    pub fn bind(&self, doc: &mut Document, scope: NodeId, location: &Url) -> usize {
        let eligible: Vec<_> = doc
            .query_all(scope, &self.links)
            .into_iter()
            .filter(|id| Self::is_eligible(doc, *id, location))
            .collect();

        for id in &eligible {
            doc.add_listener(*id, Listener::NavClick);
            if self.preload {
                doc.add_listener(*id, Listener::Preload);
            }
        }
        eligible.len()
    }

    /// Remove listeners from every matching link under `scope`.
    pub fn unbind(&self, doc: &mut Document, scope: NodeId) -> usize {
        let mut removed = 0;
        for id in doc.query_all(scope, &self.links) {
            if doc.remove_listener(id, Listener::NavClick) {
                removed += 1;
            }
            doc.remove_listener(id, Listener::Preload);
        }
        removed
    }

    /// Remove then re-add; calling it twice leaves one listener per link.
    pub fn rebind(&self, doc: &mut Document, scope: NodeId, location: &Url) -> usize {
        self.unbind(doc, scope);
        self.bind(doc, scope, location)
    }

    /// Route a click on `target` (possibly a descendant of the link).
    pub fn handle_click(&self, doc: &Document, target: NodeId, event: &ClickEvent) -> ClickOutcome {
        if !event.is_plain_primary() {
            return ClickOutcome::Default;
        }
        let Some(anchor) = doc.closest_tag(target, "a") else {
            return ClickOutcome::Default;
        };
        if !doc.has_listener(anchor, Listener::NavClick) {
            return ClickOutcome::Default;
        }
        match doc.attr(anchor, "href") {
            Some(href) => ClickOutcome::Navigate(NavigationRequest::push(href)),
            None => ClickOutcome::Default,
        }
    }

    /// Target to preload when the pointer rests on `target`.
    pub fn handle_hover(&self, doc: &Document, target: NodeId) -> Option<String> {
        let anchor = doc.closest_tag(target, "a")?;
        if !doc.has_listener(anchor, Listener::Preload) {
            return None;
        }
        doc.attr(anchor, "href").map(str::to_string)
    }

    /// History traversal: the browser already moved, so the entry is replaced.
    pub fn handle_pop(&self, location: &PopLocation) -> NavigationRequest {
        NavigationRequest::pop(location.to_target())
    }
}
