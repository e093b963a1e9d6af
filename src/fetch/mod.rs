//! Page retrieval.
//!
//! # Modules
//!
//! - `transport` - Host HTTP capability (`Transport` trait)
//! - `http` - `reqwest`-backed transport
//! - `page` - Parsed destination pages

mod http;
mod page;
mod transport;

pub use http::HttpTransport;
pub use page::FetchedPage;
pub use transport::{Credentials, FetchRequest, Response, Transport, TransportError};

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::core::RegionSpec;
use crate::debug;

/// Why a page could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to fetch {url}: {reason}")]
    Network {
        url: Url,
        /// HTTP status when the server answered with a non-2xx code.
        status: Option<u16>,
        reason: String,
    },

    #[error("fetching {url} timed out after {ms}ms")]
    Timeout { url: Url, ms: u64 },

    #[error("could not parse {url}: {reason}")]
    Parse { url: Url, reason: String },
}

/// Retrieves and parses same-origin pages. Never touches the live document.
#[derive(Debug)]
pub struct PageFetcher<T> {
    transport: T,
    regions: Vec<RegionSpec>,
    timeout: Option<Duration>,
}

impl<T: Transport> PageFetcher<T> {
    pub fn new(transport: T, regions: Vec<RegionSpec>, timeout: Option<Duration>) -> Self {
        Self {
            transport,
            regions,
            timeout,
        }
    }

    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[inline]
    pub fn regions(&self) -> &[RegionSpec] {
        &self.regions
    }

    /// Fetch a page once. No retries.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let request = FetchRequest::same_origin(url.clone());
        let pending = self.transport.get(&request);

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| FetchError::Timeout {
                    url: url.clone(),
                    ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })?,
            None => pending.await,
        };

        let response = result.map_err(|err| FetchError::Network {
            url: url.clone(),
            status: None,
            reason: err.to_string(),
        })?;

        if !response.is_success() {
            return Err(FetchError::Network {
                url: url.clone(),
                status: Some(response.status),
                reason: format!("HTTP {}", response.status),
            });
        }

        debug!("fetch"; "{} ({} bytes)", url, response.body.len());
        FetchedPage::parse(url.clone(), &response.body, &self.regions)
    }
}
