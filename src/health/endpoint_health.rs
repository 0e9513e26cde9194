use crate::health::EndpointState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Consecutive failures after which an endpoint's circuit opens
pub const FAILURE_THRESHOLD: u32 = 3;

/// How long an open circuit stays open after the last failure
pub const RESET_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Thresholds for the per-endpoint circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitPolicy {
    pub failure_threshold: u32,
    pub reset_timeout: Duration,
}

impl Default for CircuitPolicy {
    fn default() -> Self {
        Self {
            failure_threshold: FAILURE_THRESHOLD,
            reset_timeout: RESET_TIMEOUT,
        }
    }
}

/// Tracks the health of one extraction endpoint
///
/// Records live in memory for the lifetime of the client and are never
/// persisted.
#[derive(Debug, Clone)]
pub struct EndpointHealth {
    /// Endpoint base address
    pub url: String,

    /// Failures since the last success
    pub consecutive_failures: u32,

    /// Monotonic time of the most recent failure
    pub last_failure_time: Option<Instant>,

    /// Wall-clock time of the most recent failure, for reporting
    pub last_failure_at: Option<DateTime<Utc>>,

    /// Successful extractions against this endpoint
    pub success_count: u64,

    /// All extraction attempts against this endpoint
    pub total_requests: u64,
}

/// Point-in-time copy of an endpoint's health, as returned by `get_stats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointStats {
    pub url: String,
    pub failures: u32,
    pub success_count: u64,
    pub total_requests: u64,
    pub last_failure_at: Option<DateTime<Utc>>,
    pub state: EndpointState,
}

impl EndpointHealth {
    /// Creates a fresh record with zeroed counters
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            consecutive_failures: 0,
            last_failure_time: None,
            last_failure_at: None,
            success_count: 0,
            total_requests: 0,
        }
    }

    /// Returns true while the failure count is under the threshold
    pub fn is_below_threshold(&self, policy: &CircuitPolicy) -> bool {
        self.consecutive_failures < policy.failure_threshold
    }

    /// Returns true if the last failure is older than the reset timeout
    pub fn failure_expired(&self, policy: &CircuitPolicy, now: Instant) -> bool {
        match self.last_failure_time {
            Some(last) => now.saturating_duration_since(last) >= policy.reset_timeout,
            None => true,
        }
    }

    /// Derives the circuit state
    ///
    /// The circuit is open only while the failure count is at or above the
    /// threshold AND the last failure is within the reset window.
    pub fn state(&self, policy: &CircuitPolicy, now: Instant) -> EndpointState {
        if !self.is_below_threshold(policy) && !self.failure_expired(policy, now) {
            EndpointState::CircuitOpen
        } else {
            EndpointState::Available
        }
    }

    /// Clears the failure count if the last failure has aged out
    ///
    /// Returns true if anything was cleared.
    pub fn reset_if_expired(&mut self, policy: &CircuitPolicy, now: Instant) -> bool {
        if self.consecutive_failures > 0 && self.failure_expired(policy, now) {
            self.consecutive_failures = 0;
            true
        } else {
            false
        }
    }

    /// Records a failed attempt
    pub fn record_failure(&mut self, now: Instant) {
        self.consecutive_failures += 1;
        self.total_requests += 1;
        self.last_failure_time = Some(now);
        self.last_failure_at = Some(Utc::now());
    }

    /// Records a successful attempt; the failure count goes back to zero
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.success_count += 1;
        self.total_requests += 1;
    }

    /// Clears the failure count without touching the other counters
    pub fn clear_failures(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Zeroes every counter
    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
        self.last_failure_time = None;
        self.last_failure_at = None;
        self.success_count = 0;
        self.total_requests = 0;
    }

    /// Takes a reporting snapshot
    pub fn snapshot(&self, policy: &CircuitPolicy, now: Instant) -> EndpointStats {
        EndpointStats {
            url: self.url.clone(),
            failures: self.consecutive_failures,
            success_count: self.success_count,
            total_requests: self.total_requests,
            last_failure_at: self.last_failure_at,
            state: self.state(policy, now),
        }
    }
}
