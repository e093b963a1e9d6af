//! Host-provided HTTP capability.

use std::future::Future;

use thiserror::Error;
use url::Url;

/// Credentials policy attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Send cookies only to the page's own origin.
    #[default]
    SameOrigin,
}

/// A `GET` request for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    pub credentials: Credentials,
}

impl FetchRequest {
    pub fn same_origin(url: Url) -> Self {
        Self {
            url,
            credentials: Credentials::SameOrigin,
        }
    }
}

/// Raw transport response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    /// `200 text/html` response, mostly for hosts serving from memory.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.into().into_bytes(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The transport could not produce a response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// `GET <url>` with same-origin credentials.
pub trait Transport: Send + Sync {
    fn get(&self, request: &FetchRequest)
    -> impl Future<Output = Result<Response, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(Response::html("").is_success());
        assert!(Response::html("").with_status(204).is_success());
        assert!(!Response::html("").with_status(304).is_success());
        assert!(!Response::html("").with_status(404).is_success());
        assert!(!Response::html("").with_status(199).is_success());
    }
}
