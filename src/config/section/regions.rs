//! `[[nav.regions]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[nav.regions]]
//! name = "main"
//! selector = "main"
//! primary = true
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::RegionSpec;
use crate::dom::Selector;

/// A region swapped on every navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    pub selector: String,
    #[serde(default)]
    pub primary: bool,
}

impl RegionConfig {
    pub fn new(name: &str, selector: &str, primary: bool) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
            primary,
        }
    }

    /// Parse the selector into a runtime region spec.
    pub fn to_spec(&self) -> Result<RegionSpec, ConfigError> {
        let selector = Selector::parse(&self.selector).map_err(|err| {
            ConfigError::selector(&format!("nav.regions.{}.selector", self.name), &err)
        })?;
        Ok(RegionSpec::new(self.name.clone(), selector, self.primary))
    }
}

/// `main` (primary), `header`, `footer`.
pub fn default_regions() -> Vec<RegionConfig> {
    vec![
        RegionConfig::new("main", "main", true),
        RegionConfig::new("header", "header", false),
        RegionConfig::new("footer", "footer", false),
    ]
}
