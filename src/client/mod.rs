//! Client module for the remote extraction API
//!
//! This module contains the resilient request path, including:
//! - HTTP transport for single requests against one endpoint
//! - Endpoint selection with round-robin rotation and circuit breaking
//! - Failover across endpoints with a bounded number of attempts
//! - Health probes and configuration diagnostics

mod diagnostics;
mod pool;
mod scraper;
pub mod transport;

pub use diagnostics::{ApiInfo, ApiTestOutcome, AuthTestOutcome};
pub use pool::EndpointPool;
pub use scraper::ScrapingClient;
pub use transport::TransportError;

use crate::UrlError;
use thiserror::Error;

/// Caller-facing failure of a scrape
///
/// Messages are written for end users; the raw transport failure is only
/// surfaced verbatim when it cannot be classified.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Please enter a TripAdvisor restaurant URL")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Only TripAdvisor restaurant pages are supported (got {0})")]
    UnsupportedSource(String),

    #[error("Scraping API key is not configured. Set DINESCOUT_API_KEY or [api] api-key.")]
    MissingApiKey,

    #[error("No scraping endpoints are configured")]
    NoEndpoints,

    #[error("The request took too long. The page may be slow to load; please try again.")]
    TimedOut,

    #[error("Authentication failed. Please check the scraping API key.")]
    AuthenticationFailed,

    #[error("Access denied. The API key does not have permission to scrape.")]
    AuthorizationFailed,

    #[error("{0}")]
    Failed(String),

    #[error("All scraping endpoints are currently unavailable. Please try again later.")]
    AllEndpointsUnavailable,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ScrapeError {
    /// Classifies an exhausted attempt loop by its most recent failure
    ///
    /// `None` means no attempt was made, which only happens when every
    /// untried endpoint had an open circuit.
    pub fn from_last_failure(last: Option<TransportError>) -> Self {
        match last {
            None => Self::AllEndpointsUnavailable,
            Some(TransportError::Timeout) => Self::TimedOut,
            Some(TransportError::Unauthorized) => Self::AuthenticationFailed,
            Some(TransportError::Forbidden) => Self::AuthorizationFailed,
            Some(other) => Self::Failed(other.to_string()),
        }
    }

    /// Whether the error was raised before any network I/O
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingUrl
                | Self::InvalidUrl(_)
                | Self::UnsupportedSource(_)
                | Self::MissingApiKey
                | Self::NoEndpoints
        )
    }
}

impl From<UrlError> for ScrapeError {
    fn from(e: UrlError) -> Self {
        match e {
            UrlError::Empty => Self::MissingUrl,
            UrlError::UnsupportedSource(domain) => Self::UnsupportedSource(domain),
            UrlError::Parse(msg) | UrlError::InvalidScheme(msg) => Self::InvalidUrl(msg),
            UrlError::MissingDomain => Self::InvalidUrl("missing domain".to_string()),
        }
    }
}
