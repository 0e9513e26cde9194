//! Endpoint-resilient scraping client
//!
//! One `ScrapingClient` is built by the application's composition root and
//! shared by reference. It validates extraction requests locally, picks an
//! endpoint from the pool, fails over on any error, and keeps the pool's
//! health table current.

use crate::client::diagnostics::{ApiInfo, ApiTestOutcome, AuthTestOutcome};
use crate::client::pool::EndpointPool;
use crate::client::transport::{self, TransportError};
use crate::client::ScrapeError;
use crate::config::ClientSettings;
use crate::health::{CircuitPolicy, EndpointStats, HealthStatus};
use crate::models::{EndpointHealthReport, ExtractedRestaurantData, ExtractionRequest};
use crate::url::{classify_page, validate_source_url};
use futures::future::join_all;
use reqwest::Client;
use std::time::Instant;

/// Client for the extraction API with failover across endpoints
pub struct ScrapingClient {
    http: Client,
    pool: EndpointPool,
    settings: ClientSettings,
}

impl ScrapingClient {
    /// Creates a client with the default circuit-breaker policy
    ///
    /// A missing API key is logged as an error but does not fail
    /// construction; extraction calls will be refused until one is set,
    /// while health probes keep working.
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapingClient)` - Client ready for use
    /// * `Err(ScrapeError::Client)` - The HTTP client could not be built
    pub fn new(settings: ClientSettings) -> Result<Self, ScrapeError> {
        Self::with_policy(settings, CircuitPolicy::default())
    }

    /// Creates a client with an explicit circuit-breaker policy
    pub fn with_policy(settings: ClientSettings, policy: CircuitPolicy) -> Result<Self, ScrapeError> {
        let http = transport::build_http_client(&settings)?;

        if !settings.has_api_key() {
            tracing::error!(
                "No scraping API key configured; extraction requests will fail until one is set"
            );
        }

        if settings.endpoints.is_empty() {
            tracing::error!("No extraction endpoints configured");
        } else {
            tracing::info!(
                "Scraping client using {} endpoint(s) from {}",
                settings.endpoints.len(),
                settings.endpoint_source
            );
        }

        let pool = EndpointPool::new(settings.endpoints.clone(), policy);

        Ok(Self {
            http,
            pool,
            settings,
        })
    }

    /// Extracts restaurant data from a review-site page
    ///
    /// # Request Flow
    ///
    /// 1. Validate the URL and the API key (no network I/O on failure)
    /// 2. Select an endpoint from the pool
    /// 3. On failure, mark the endpoint failed and select another endpoint;
    ///    the retry delay is only waited when one is available, and each
    ///    endpoint is tried at most once
    /// 4. On success, mark the endpoint healthy and return immediately
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractedRestaurantData)` - Data from the first endpoint that succeeded
    /// * `Err(ScrapeError)` - Invalid input, or every attempt failed; the error
    ///   is classified by the last transport failure
    pub async fn scrape_restaurant(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractedRestaurantData, ScrapeError> {
        let source_url = validate_source_url(&request.url, &self.settings.allowed_domains)?;

        if !classify_page(&source_url).is_single_restaurant() {
            tracing::warn!(
                "{} does not look like a restaurant review page; extraction may fail",
                source_url
            );
        }

        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ScrapeError::MissingApiKey)?;

        if self.pool.is_empty() {
            return Err(ScrapeError::NoEndpoints);
        }

        let body = ExtractionRequest {
            url: source_url.to_string(),
            options: request.options.clone(),
        };

        let max_attempts = self.pool.len();
        let mut tried: Vec<usize> = Vec::with_capacity(max_attempts);
        let mut last_error: Option<TransportError> = None;

        let mut next = self.pool.select(Instant::now(), &tried);

        while let Some(index) = next {
            tried.push(index);
            let endpoint = &self.pool.endpoints()[index];

            tracing::info!(
                "Scraping {} via {} (attempt {}/{})",
                body.url,
                endpoint,
                tried.len(),
                max_attempts
            );

            match transport::post_scrape(
                &self.http,
                endpoint,
                Some(api_key),
                &body,
                self.settings.timeout,
            )
            .await
            {
                Ok(data) => {
                    self.pool.mark_success(index);
                    tracing::info!("Extracted '{}' via {}", data.name, endpoint);
                    return Ok(data);
                }
                Err(e) => {
                    let failures = self.pool.mark_failure(index, Instant::now());
                    tracing::warn!(
                        "Endpoint {} failed ({} consecutive): {}",
                        endpoint,
                        failures,
                        e
                    );
                    last_error = Some(e);
                }
            }

            if tried.len() >= max_attempts {
                break;
            }

            // Only wait when there is another endpoint to try
            next = self.pool.select(Instant::now(), &tried);
            match next {
                Some(_) => tokio::time::sleep(self.settings.retry_delay).await,
                None => tracing::warn!("No remaining endpoint with a closed circuit"),
            }
        }

        let error = ScrapeError::from_last_failure(last_error);
        tracing::error!(
            "Scrape of {} failed after {} attempt(s): {}",
            body.url,
            tried.len(),
            error
        );
        Err(error)
    }

    /// Probes `/api/health` on every configured endpoint
    ///
    /// Every endpoint is probed regardless of circuit state, concurrently,
    /// each bounded by the health timeout. Results come back in configured
    /// order; an endpoint that cannot be reached is reported `Unhealthy`.
    pub async fn health_check(&self) -> Vec<EndpointHealthReport> {
        let probes = self
            .pool
            .endpoints()
            .iter()
            .map(|endpoint| self.probe(endpoint));
        join_all(probes).await
    }

    async fn probe(&self, endpoint: &str) -> EndpointHealthReport {
        let started = Instant::now();
        let result = transport::get_health(&self.http, endpoint, self.settings.health_timeout).await;
        let response_time_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(details) => {
                tracing::debug!("{} reports {}", endpoint, details.status);
                EndpointHealthReport {
                    endpoint: endpoint.to_string(),
                    status: details.status,
                    response_time_ms,
                    details: Some(details),
                    error: None,
                }
            }
            Err(e) => {
                tracing::debug!("Health probe of {} failed: {}", endpoint, e);
                EndpointHealthReport {
                    endpoint: endpoint.to_string(),
                    status: HealthStatus::Unhealthy,
                    response_time_ms,
                    details: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Summarises how many endpoints are healthy
    pub async fn test_api(&self) -> ApiTestOutcome {
        let outcome = ApiTestOutcome::from_reports(self.health_check().await);
        tracing::info!("{}", outcome.message);
        outcome
    }

    /// Distinguishes a missing key from unreachable endpoints
    pub async fn test_authentication(&self) -> AuthTestOutcome {
        if !self.settings.has_api_key() {
            return AuthTestOutcome::NoKeyConfigured;
        }

        let outcome = self.test_api().await;
        if outcome.success {
            AuthTestOutcome::Ready {
                healthy_endpoints: outcome.healthy_endpoints,
                total_endpoints: outcome.total_endpoints,
            }
        } else {
            AuthTestOutcome::Unreachable {
                total_endpoints: outcome.total_endpoints,
            }
        }
    }

    /// Snapshot of every endpoint's health record
    pub fn get_stats(&self) -> Vec<EndpointStats> {
        self.pool.stats(Instant::now())
    }

    /// Zeroes every endpoint's counters
    pub fn reset_stats(&self) {
        self.pool.reset_stats();
        tracing::info!("Endpoint statistics reset");
    }

    /// Reports the resolved configuration
    pub fn get_api_info(&self) -> ApiInfo {
        let policy = self.pool.policy();
        ApiInfo {
            endpoints: self.settings.endpoints.clone(),
            endpoint_source: self.settings.endpoint_source,
            environment: self.settings.environment,
            timeout: self.settings.timeout,
            retry_delay: self.settings.retry_delay,
            health_timeout: self.settings.health_timeout,
            has_api_key: self.settings.has_api_key(),
            failure_threshold: policy.failure_threshold,
            reset_timeout: policy.reset_timeout,
        }
    }

    /// The endpoint pool backing this client
    pub fn pool(&self) -> &EndpointPool {
        &self.pool
    }
}
