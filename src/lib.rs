//! Tola Nav - SPA-style page transitions for multi-page sites.
//!
//! Same-origin link clicks are intercepted, the target page is fetched and
//! its configured regions are swapped into the live document, optionally
//! inside a view transition. Anything unexpected falls back to a plain
//! full-page navigation.
//!
//! # Modules
//!
//! | Module    | Purpose                                            |
//! |-----------|----------------------------------------------------|
//! | `config`  | `tola-nav.toml` loading and validation             |
//! | `core`    | Links, locations, requests, controller states      |
//! | `dom`     | Arena document, fragments, selectors               |
//! | `fetch`   | Transport seam and page parsing                    |
//! | `swap`    | Region reconciliation                              |
//! | `scripts` | Re-running scripts brought in by new pages         |
//! | `host`    | Window seam (history, view transitions)            |
//! | `nav`     | Controller, link interception, preloading          |
//! | `theme`   | Light/dark preference and toggle control           |
//! | `form`    | Contact form validation log                        |

pub mod logger;

pub mod config;
pub mod core;
pub mod dom;
pub mod fetch;
pub mod form;
pub mod host;
pub mod nav;
pub mod scripts;
pub mod swap;
pub mod theme;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{CONFIG_FILE, Concurrency, Config, ConfigError, NavConfig};
pub use core::{NavState, NavigationRequest, PopLocation};
pub use dom::{Document, NodeId, SharedDocument};
pub use fetch::{FetchError, HttpTransport, Transport};
pub use host::{FinishSignal, Finished, TransitionError, Window};
pub use nav::{ClickEvent, Controller, NavError, NavOutcome, NavReport};
pub use theme::{ThemePreference, ThemeStore};
