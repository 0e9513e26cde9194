//! Endpoint selection with round-robin rotation and circuit breaking
//!
//! The pool owns the health table for every configured endpoint. Selection:
//! 1. Lazily clears failure counts whose last failure has aged out
//! 2. Scans from a rotating cursor for the first endpoint under the failure
//!    threshold
//! 3. If every endpoint is at or above the threshold, force-resets all of
//!    them and returns the first configured endpoint

use crate::health::{CircuitPolicy, EndpointHealth, EndpointStats};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Health-tracked set of interchangeable endpoints
///
/// The health table is guarded by a std mutex that is never held across an
/// `.await`; every mutation is a short counter update.
#[derive(Debug)]
pub struct EndpointPool {
    endpoints: Vec<String>,
    health: Mutex<Vec<EndpointHealth>>,
    cursor: AtomicUsize,
    policy: CircuitPolicy,
}

impl EndpointPool {
    /// Creates a pool with one zeroed health record per endpoint
    pub fn new(endpoints: Vec<String>, policy: CircuitPolicy) -> Self {
        let health = endpoints.iter().map(EndpointHealth::new).collect();
        Self {
            endpoints,
            health: Mutex::new(health),
            cursor: AtomicUsize::new(0),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoint addresses in configured order
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn policy(&self) -> &CircuitPolicy {
        &self.policy
    }

    /// Selects the next endpoint to try
    ///
    /// # Arguments
    ///
    /// * `now` - The current time instant
    /// * `exclude` - Indices already tried during the current call
    ///
    /// # Returns
    ///
    /// * `Some(index)` - The endpoint to use
    /// * `None` - The pool is empty, or every untried endpoint has an open
    ///   circuit while some other endpoint is still under the threshold
    pub fn select(&self, now: Instant, exclude: &[usize]) -> Option<usize> {
        let count = self.endpoints.len();
        if count == 0 {
            return None;
        }

        let mut health = self.lock();

        for record in health.iter_mut() {
            if record.reset_if_expired(&self.policy, now) {
                tracing::debug!("Circuit for {} closed after reset timeout", record.url);
            }
        }

        let start = self.cursor.fetch_add(1, Ordering::Relaxed) % count;
        for offset in 0..count {
            let index = (start + offset) % count;
            if exclude.contains(&index) {
                continue;
            }
            if health[index].is_below_threshold(&self.policy) {
                return Some(index);
            }
        }

        if health
            .iter()
            .all(|record| !record.is_below_threshold(&self.policy))
        {
            tracing::warn!(
                "All {} endpoints have open circuits; forcing a reset of every failure count",
                count
            );
            for record in health.iter_mut() {
                record.clear_failures();
            }
            return (0..count).find(|index| !exclude.contains(index));
        }

        None
    }

    /// Selects the next endpoint with nothing excluded
    ///
    /// Always returns `Some` for a non-empty pool.
    pub fn next_endpoint(&self, now: Instant) -> Option<usize> {
        self.select(now, &[])
    }

    /// Records a failed attempt and returns the new consecutive failure count
    pub fn mark_failure(&self, index: usize, now: Instant) -> u32 {
        let mut health = self.lock();
        match health.get_mut(index) {
            Some(record) => {
                record.record_failure(now);
                record.consecutive_failures
            }
            None => 0,
        }
    }

    /// Records a successful attempt
    pub fn mark_success(&self, index: usize) {
        if let Some(record) = self.lock().get_mut(index) {
            record.record_success();
        }
    }

    /// Snapshot of every endpoint's health, in configured order
    pub fn stats(&self, now: Instant) -> Vec<EndpointStats> {
        self.lock()
            .iter()
            .map(|record| record.snapshot(&self.policy, now))
            .collect()
    }

    /// Zeroes every counter on every endpoint
    pub fn reset_stats(&self) {
        for record in self.lock().iter_mut() {
            record.reset();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EndpointHealth>> {
        // Counters stay meaningful even if a holder panicked.
        self.health.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
