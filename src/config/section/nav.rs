//! `[nav]` configuration for SPA navigation.
//!
//! # Example
//!
//! ```toml
//! [nav]
//! spa = true
//! links = "header nav a"
//! sticky = "theme-toggle"
//! sticky_home = "header"
//! concurrency = "race"
//! transition = { style = "fade", time = 200 }
//! preload = { enable = true, delay = 100 }
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::fetch::FetchConfig;
use super::preload::PreloadConfig;
use super::regions::{RegionConfig, default_regions};
use super::transition::TransitionConfig;
use crate::config::ConfigError;
use crate::core::RegionSpec;
use crate::dom::Selector;

/// SPA navigation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Enable SPA navigation (link interception + region swaps).
    pub spa: bool,

    /// Selector of the links that get intercepted.
    pub links: String,

    /// Id of the element that survives region swaps.
    pub sticky: String,

    /// Region the sticky element returns to when a swap detaches it.
    pub sticky_home: String,

    /// What happens when navigations overlap.
    pub concurrency: Concurrency,

    /// View transition settings.
    pub transition: TransitionConfig,

    /// Page retrieval settings.
    pub fetch: FetchConfig,

    /// Preload/prefetch settings.
    pub preload: PreloadConfig,

    /// Regions replaced on every navigation.
    pub regions: Vec<RegionConfig>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            spa: true,
            links: "header nav a".to_string(),
            sticky: crate::theme::THEME_TOGGLE_ID.to_string(),
            sticky_home: "header".to_string(),
            concurrency: Concurrency::default(),
            transition: TransitionConfig::default(),
            fetch: FetchConfig::default(),
            preload: PreloadConfig::default(),
            regions: default_regions(),
        }
    }
}

/// Policy for overlapping navigations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concurrency {
    /// Overlapping runs proceed independently; the last swap wins.
    #[default]
    Race,

    /// Only the most recent run may mutate the document.
    Latest,
}

impl NavConfig {
    /// Parsed link selector.
    pub fn link_selector(&self) -> Result<Selector, ConfigError> {
        Selector::parse(&self.links).map_err(|err| ConfigError::selector("nav.links", &err))
    }

    /// Validate the section and produce the runtime region list.
    pub fn region_specs(&self) -> Result<Vec<RegionSpec>, ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::Validation(
                "`nav.regions` must declare at least one region".into(),
            ));
        }

        let mut names = FxHashSet::default();
        for region in &self.regions {
            if region.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "`nav.regions` entries need a non-empty name".into(),
                ));
            }
            if !names.insert(region.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate region name `{}` in `nav.regions`",
                    region.name
                )));
            }
        }

        let primaries = self.regions.iter().filter(|r| r.primary).count();
        if primaries != 1 {
            return Err(ConfigError::Validation(format!(
                "`nav.regions` needs exactly one primary region, found {primaries}"
            )));
        }

        if !self.sticky_home.is_empty() && !names.contains(self.sticky_home.as_str()) {
            return Err(ConfigError::Validation(format!(
                "`nav.sticky_home` names unknown region `{}`",
                self.sticky_home
            )));
        }

        self.regions.iter().map(RegionConfig::to_spec).collect()
    }

    /// Full section validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.link_selector()?;
        self.region_specs()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::section::TransitionStyle;
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_nav_defaults() {
        let nav = NavConfig::default();
        assert!(nav.spa);
        assert_eq!(nav.links, "header nav a");
        assert_eq!(nav.sticky, "theme-toggle");
        assert_eq!(nav.concurrency, Concurrency::Race);
        assert_eq!(nav.transition.style, TransitionStyle::Fade);
        assert_eq!(nav.transition.time, 200);
        assert_eq!(nav.transition.timeout, 5000);
        assert_eq!(nav.fetch.timeout, 10_000);
        assert!(!nav.preload.enable);
        assert_eq!(nav.preload.delay, 100);

        let specs = nav.region_specs().unwrap();
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["main", "header", "footer"]);
        assert!(specs[0].primary);
    }

    #[test]
    fn test_nav_inline_tables() {
        let config = test_parse_config(
            "spa = false\nconcurrency = \"latest\"\ntransition = { style = \"none\" }\npreload = { enable = true, delay = 50 }",
        );
        assert!(!config.nav.spa);
        assert_eq!(config.nav.concurrency, Concurrency::Latest);
        assert!(!config.nav.transition.is_enabled());
        // Unspecified fields keep their defaults
        assert_eq!(config.nav.transition.time, 200);
        assert!(config.nav.preload.enable);
        assert_eq!(config.nav.preload.delay().as_millis(), 50);
    }

    #[test]
    fn test_zero_timeouts_disable() {
        let config = test_parse_config("[nav.fetch]\ntimeout = 0\n[nav.transition]\ntimeout = 0");
        assert!(config.nav.fetch.timeout().is_none());
        assert!(config.nav.transition.timeout().is_none());
    }

    #[test]
    fn test_custom_regions_replace_defaults() {
        let config = test_parse_config(
            "[[nav.regions]]\nname = \"content\"\nselector = \"#content\"\nprimary = true\n\n[[nav.regions]]\nname = \"header\"\nselector = \"body header\"",
        );
        assert_eq!(config.nav.regions.len(), 2);
        assert!(!config.nav.regions[1].primary);
    }

    #[test]
    fn test_validate_no_regions() {
        let nav = NavConfig {
            regions: Vec::new(),
            ..NavConfig::default()
        };
        let err = nav.validate().unwrap_err();
        assert!(err.to_string().contains("at least one region"));
    }

    #[test]
    fn test_validate_primary_count() {
        let mut nav = NavConfig::default();
        nav.regions[1].primary = true;
        assert!(nav.validate().unwrap_err().to_string().contains("found 2"));

        nav.regions.iter_mut().for_each(|r| r.primary = false);
        assert!(nav.validate().unwrap_err().to_string().contains("found 0"));
    }

    #[test]
    fn test_validate_duplicate_names() {
        let mut nav = NavConfig::default();
        nav.regions.push(RegionConfig::new("footer", "#footer", false));
        assert!(
            nav.validate()
                .unwrap_err()
                .to_string()
                .contains("duplicate region name `footer`")
        );
    }

    #[test]
    fn test_validate_sticky_home() {
        let nav = NavConfig {
            sticky_home: "sidebar".to_string(),
            ..NavConfig::default()
        };
        assert!(nav.validate().unwrap_err().to_string().contains("sidebar"));
    }

    #[test]
    fn test_validate_bad_selectors() {
        let nav = NavConfig {
            links: "   ".to_string(),
            ..NavConfig::default()
        };
        assert!(nav.validate().unwrap_err().to_string().contains("nav.links"));

        let mut nav = NavConfig::default();
        nav.regions[0].selector = "main > p".to_string();
        assert!(
            nav.validate()
                .unwrap_err()
                .to_string()
                .contains("nav.regions.main.selector")
        );
    }
}
