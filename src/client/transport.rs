//! HTTP transport to the extraction API
//!
//! This module performs single requests against one endpoint and turns
//! every failure into a typed `TransportError`:
//! - `POST {endpoint}/api/scrape` for extraction
//! - `GET {endpoint}/api/health` for status probes
//!
//! Failover and health bookkeeping happen one level up, in the client.

use crate::config::ClientSettings;
use crate::models::{ExtractedRestaurantData, ExtractionRequest, HealthResponse, ScrapeResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Longest error body kept in a `TransportError::Status` message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure of a single request against a single endpoint
///
/// The variants carry enough structure that callers never need to inspect
/// message text to classify a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP 401 Unauthorized")]
    Unauthorized,

    #[error("HTTP 403 Forbidden")]
    Forbidden,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Endpoint answered 2xx but reported `success: false`
    #[error("{0}")]
    Remote(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_connect() {
            Self::Network(format!("connection failed: {}", e))
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Error body shape used by the extraction API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Builds the shared HTTP client
///
/// Timeouts are applied per request, so one client serves both extraction
/// calls and the shorter health probes.
pub fn build_http_client(settings: &ClientSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends one extraction request to one endpoint
///
/// # Returns
///
/// * `Ok(ExtractedRestaurantData)` - The endpoint returned `success: true` with data
/// * `Err(TransportError)` - Timeout, connection failure, non-2xx status,
///   undecodable body, or a remote `success: false`
pub async fn post_scrape(
    client: &Client,
    endpoint: &str,
    api_key: Option<&str>,
    request: &ExtractionRequest,
    timeout: Duration,
) -> Result<ExtractedRestaurantData, TransportError> {
    let url = format!("{}/api/scrape", endpoint);

    let mut builder = client
        .post(&url)
        .timeout(timeout)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .json(request);

    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }

    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(response).await);
    }

    let body: ScrapeResponse = response.json().await?;
    tracing::debug!(
        "Scrape response from {} (api version {})",
        endpoint,
        body.version.as_deref().unwrap_or("unknown")
    );

    match (body.success, body.data) {
        (true, Some(data)) => Ok(data),
        (true, None) => Err(TransportError::Remote(
            "endpoint reported success without restaurant data".to_string(),
        )),
        (false, _) => Err(TransportError::Remote(
            body.error
                .unwrap_or_else(|| "extraction failed without an error message".to_string()),
        )),
    }
}

/// Probes one endpoint's `/api/health`
pub async fn get_health(
    client: &Client,
    endpoint: &str,
    timeout: Duration,
) -> Result<HealthResponse, TransportError> {
    let url = format!("{}/api/health", endpoint);

    let response = client
        .get(&url)
        .timeout(timeout)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    Ok(response.json().await?)
}

/// Maps a non-2xx response to a `TransportError`
async fn status_error(response: Response) -> TransportError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED => TransportError::Unauthorized,
        StatusCode::FORBIDDEN => TransportError::Forbidden,
        _ => {
            let body = response.text().await.unwrap_or_default();
            TransportError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            }
        }
    }
}

/// Picks the most useful message from an error response body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
    }

    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
