//! Core types - pure abstractions shared across the crate.

mod link;
mod location;
mod request;
mod state;

pub use link::{LinkKind, has_scheme};
pub use location::{PopLocation, document_key, is_same_origin, resolve};
pub use request::{NavigationRequest, RegionSpec};
pub use state::NavState;
