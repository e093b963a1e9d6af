//! Light/dark theme preference and its toggle control.
//!
//! The toggle button is the default sticky element: it is created once in
//! the header and survives every region swap.
//!
//! ```text
//! <button id="theme-toggle" aria-label="Switch to light mode">
//!   <span aria-hidden="true">D</span>
//! </button>
//! ```

mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::dom::{Attrs, Document, Listener, NodeId, Selector};
use crate::log;

/// Storage key of the persisted preference.
pub const THEME_KEY: &str = "theme";

/// Element id of the toggle control.
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Single-letter glyph shown inside the toggle.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Light => "L",
            Self::Dark => "D",
        }
    }

    fn toggle_label(self) -> String {
        format!("Switch to {} mode", self.other())
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current preference backed by a [`Storage`].
#[derive(Debug)]
pub struct ThemeStore<S> {
    storage: S,
    current: ThemePreference,
}

impl<S: Storage> ThemeStore<S> {
    /// Read the persisted preference; missing or invalid values mean dark.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let current = match storage.get(THEME_KEY)? {
            Some(value) => ThemePreference::parse(&value).unwrap_or_else(|| {
                log!("theme"; "ignoring stored preference `{}`", value);
                ThemePreference::default()
            }),
            None => ThemePreference::default(),
        };
        Ok(Self { storage, current })
    }

    #[inline]
    pub fn current(&self) -> ThemePreference {
        self.current
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flip and persist the preference.
    pub fn toggle(&mut self) -> Result<ThemePreference, StorageError> {
        let next = self.current.other();
        self.storage.set(THEME_KEY, next.as_str())?;
        self.current = next;
        Ok(next)
    }

    /// Reflect the preference as `data-theme` on `<html>`.
    pub fn apply(&self, doc: &mut Document) {
        let target = theme_root(doc);
        doc.set_attr(target, "data-theme", self.current.as_str());
    }

    /// Preference currently shown by the document's `data-theme`.
    pub fn shown(doc: &Document) -> Option<ThemePreference> {
        doc.attr(theme_root(doc), "data-theme")
            .and_then(ThemePreference::parse)
    }

    /// Create the toggle in `<header>` (or `<body>`), unless one exists.
    ///
    /// Returns the toggle element, or `None` when there is no place for it.
    pub fn install_toggle(&self, doc: &mut Document) -> Option<NodeId> {
        if let Some(existing) = doc.element_by_id(THEME_TOGGLE_ID) {
            doc.add_listener(existing, Listener::ThemeToggle);
            return Some(existing);
        }

        let parent = doc
            .query(doc.root(), &Selector::tag("header"))
            .unwrap_or_else(|| doc.body());
        if parent == doc.root() {
            return None;
        }

        let attrs: Attrs = smallvec![
            ("id".to_string(), THEME_TOGGLE_ID.to_string()),
            ("aria-label".to_string(), self.current.toggle_label()),
        ];
        let button = doc.create_element("button", attrs);
        let span = doc.create_element(
            "span",
            smallvec![("aria-hidden".to_string(), "true".to_string())],
        );
        let glyph = doc.create_text(self.current.glyph());
        doc.append_child(span, glyph);
        doc.append_child(button, span);
        doc.append_child(parent, button);
        doc.add_listener(button, Listener::ThemeToggle);
        Some(button)
    }

    /// Route a click; toggles when `target` sits inside the toggle control.
    ///
    /// Returns the new preference, or `None` for unrelated clicks.
    pub fn handle_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
    ) -> Result<Option<ThemePreference>, StorageError> {
        let Some(button) = doc.closest_tag(target, "button") else {
            return Ok(None);
        };
        if !doc.has_listener(button, Listener::ThemeToggle) {
            return Ok(None);
        }

        // `data-theme` wins over the cached value
        if let Some(shown) = Self::shown(doc) {
            self.current = shown;
        }
        let next = self.toggle()?;
        self.apply(doc);
        self.sync_toggle(doc, button);
        Ok(Some(next))
    }

    fn sync_toggle(&self, doc: &mut Document, button: NodeId) {
        doc.set_attr(button, "aria-label", &self.current.toggle_label());
        match doc.query(button, &Selector::tag("span")) {
            Some(span) => doc.set_text_content(span, self.current.glyph()),
            None => doc.set_text_content(button, self.current.glyph()),
        }
    }
}

/// `<html>`, or `<body>` for fragments without one.
fn theme_root(doc: &Document) -> NodeId {
    doc.query(doc.root(), &Selector::tag("html"))
        .unwrap_or_else(|| doc.body())
}
