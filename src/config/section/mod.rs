//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tola-nav.toml`:
//!
//! | Module       | TOML Section         | Purpose                          |
//! |--------------|----------------------|----------------------------------|
//! | `nav`        | `[nav]`              | Links, sticky element, policy    |
//! | `transition` | `[nav.transition]`   | View transition style and bound  |
//! | `fetch`      | `[nav.fetch]`        | Page retrieval timeout           |
//! | `preload`    | `[nav.preload]`      | Hover prefetching                |
//! | `regions`    | `[[nav.regions]]`    | Swapped regions                  |

mod fetch;
mod nav;
mod preload;
mod regions;
mod transition;

pub use fetch::FetchConfig;
pub use nav::{Concurrency, NavConfig};
pub use preload::PreloadConfig;
pub use regions::{RegionConfig, default_regions};
pub use transition::{TransitionConfig, TransitionStyle};
