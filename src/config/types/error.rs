//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::dom::SelectorError;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Validation error for a selector that does not parse.
    pub(crate) fn selector(field: &str, err: &SelectorError) -> Self {
        Self::Validation(format!("`{field}`: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_names_path() {
        let err = ConfigError::Io(
            PathBuf::from("tola-nav.toml"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "IO error when reading `tola-nav.toml`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_selector_error_names_field() {
        let err = ConfigError::selector("nav.links", &SelectorError::Empty);
        assert!(err.to_string().contains("`nav.links`"));
    }
}
