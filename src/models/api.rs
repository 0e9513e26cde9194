//! Wire types for the extraction API

use crate::health::HealthStatus;
use crate::models::ExtractedRestaurantData;
use serde::{Deserialize, Serialize};

/// Per-request options forwarded to the extraction API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    /// Remote page-load timeout (milliseconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Remote retry count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// User agent the remote scraper should present to the review site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ScrapeOptions {
    pub fn is_empty(&self) -> bool {
        self.timeout.is_none() && self.retries.is_none() && self.user_agent.is_none()
    }
}

/// Request to extract restaurant data from a review-site page
///
/// Serializes directly as the `POST /api/scrape` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Review-site page URL
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ScrapeOptions>,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            options: None,
        }
    }

    /// Attaches options; empty options are dropped so the body stays minimal
    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = if options.is_empty() {
            None
        } else {
            Some(options)
        };
        self
    }
}

/// Body of a `POST /api/scrape` response
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ExtractedRestaurantData>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Status of the services behind an endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub scraping: Option<String>,
    #[serde(default)]
    pub external_apis: Option<String>,
}

/// Body of a `GET /api/health` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Seconds since the endpoint process started
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub services: ServiceStatus,
}

/// Outcome of probing one endpoint's `/api/health`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointHealthReport {
    pub endpoint: String,
    pub status: HealthStatus,
    pub response_time_ms: u64,
    /// Parsed response, when the endpoint answered
    pub details: Option<HealthResponse>,
    /// Transport or decode failure, when it did not
    pub error: Option<String>,
}
