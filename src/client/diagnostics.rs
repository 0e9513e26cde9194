//! Diagnostic summaries built on top of health probes and configuration

use crate::config::{EndpointSource, Environment};
use crate::models::EndpointHealthReport;
use serde::Serialize;
use std::time::Duration;

/// Resolved client configuration, for debugging
#[derive(Debug, Clone, PartialEq)]
pub struct ApiInfo {
    pub endpoints: Vec<String>,
    pub endpoint_source: EndpointSource,
    pub environment: Environment,
    pub timeout: Duration,
    pub retry_delay: Duration,
    pub health_timeout: Duration,
    pub has_api_key: bool,
    pub failure_threshold: u32,
    pub reset_timeout: Duration,
}

/// Summary of a `test_api` run
#[derive(Debug, Clone, Serialize)]
pub struct ApiTestOutcome {
    pub success: bool,
    pub healthy_endpoints: usize,
    pub total_endpoints: usize,
    pub message: String,
    pub reports: Vec<EndpointHealthReport>,
}

impl ApiTestOutcome {
    pub fn from_reports(reports: Vec<EndpointHealthReport>) -> Self {
        let total_endpoints = reports.len();
        let healthy_endpoints = reports.iter().filter(|r| r.status.is_healthy()).count();
        let success = healthy_endpoints > 0;

        let message = if success {
            format!(
                "Scraping API is reachable: {}/{} endpoints healthy",
                healthy_endpoints, total_endpoints
            )
        } else {
            format!(
                "Scraping API is unavailable: none of {} endpoints reported healthy",
                total_endpoints
            )
        };

        Self {
            success,
            healthy_endpoints,
            total_endpoints,
            message,
            reports,
        }
    }
}

/// Outcome of `test_authentication`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthTestOutcome {
    /// No API key is configured; extraction calls will be refused locally
    NoKeyConfigured,

    /// A key is configured but no endpoint reported healthy
    Unreachable { total_endpoints: usize },

    /// A key is configured and at least one endpoint is healthy
    Ready {
        healthy_endpoints: usize,
        total_endpoints: usize,
    },
}

impl AuthTestOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// User-facing description of the outcome
    pub fn message(&self) -> String {
        match self {
            Self::NoKeyConfigured => {
                "No scraping API key configured. Set DINESCOUT_API_KEY or [api] api-key."
                    .to_string()
            }
            Self::Unreachable { total_endpoints } => format!(
                "API key is configured, but none of {} endpoints could be reached",
                total_endpoints
            ),
            Self::Ready {
                healthy_endpoints,
                total_endpoints,
            } => format!(
                "API key is configured and {}/{} endpoints are healthy",
                healthy_endpoints, total_endpoints
            ),
        }
    }
}
