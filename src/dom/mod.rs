//! Page model.
//!
//! Two ownership domains:
//!
//! ```text
//! fetched markup --tl--> Fragment (detached) --import--> Document (live arena)
//! ```
//!
//! # Modules
//!
//! - `document` - Arena-backed live document with listeners
//! - `fragment` - Detached trees parsed from fetched pages
//! - `html` - Escaping and serialization helpers
//! - `node` - Node handles and payloads
//! - `parse` - `tl`-based HTML parsing
//! - `selector` - Minimal descendant selectors

mod document;
mod fragment;
mod html;
mod node;
mod parse;
mod selector;

pub use document::{DomError, Document, ImportError, MAX_IMPORT_DEPTH, SharedDocument};
pub use fragment::{Fragment, FragmentElement, FragmentNode};
pub use node::{Attrs, Listener, NodeData, NodeId};
pub use parse::{HtmlError, parse_html};
pub use selector::{Selector, SelectorError};
