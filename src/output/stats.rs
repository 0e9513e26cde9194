//! Endpoint statistics display
//!
//! This module renders the client's per-endpoint health counters.

use crate::health::{EndpointState, EndpointStats};

/// Totals across every endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsSummary {
    pub endpoints: usize,
    pub available: usize,
    pub total_requests: u64,
    pub successes: u64,
}

impl StatisticsSummary {
    pub fn from_stats(stats: &[EndpointStats]) -> Self {
        Self {
            endpoints: stats.len(),
            available: stats
                .iter()
                .filter(|s| s.state == EndpointState::Available)
                .count(),
            total_requests: stats.iter().map(|s| s.total_requests).sum(),
            successes: stats.iter().map(|s| s.success_count).sum(),
        }
    }

    /// Share of requests that succeeded, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.successes as f64 / self.total_requests as f64) * 100.0
        }
    }
}

/// Prints endpoint statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - Snapshot from `ScrapingClient::get_stats`
pub fn print_statistics(stats: &[EndpointStats]) {
    println!("=== Endpoint Statistics ===\n");

    for endpoint in stats {
        println!("{}", endpoint.url);
        println!("  State: {}", endpoint.state.as_str());
        println!("  Consecutive failures: {}", endpoint.failures);
        println!(
            "  Requests: {} ({} succeeded)",
            endpoint.total_requests, endpoint.success_count
        );
        if let Some(at) = endpoint.last_failure_at {
            println!("  Last failure: {}", at.to_rfc3339());
        }
        println!();
    }

    let summary = StatisticsSummary::from_stats(stats);
    println!(
        "Available: {}/{} endpoints",
        summary.available, summary.endpoints
    );
    println!(
        "Success Rate: {:.1}% ({} / {} requests)",
        summary.success_rate(),
        summary.successes,
        summary.total_requests
    );
}
