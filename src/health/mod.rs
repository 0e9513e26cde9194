//! Health module for tracking extraction endpoints
//!
//! # Components
//!
//! - `EndpointHealth`: per-endpoint failure and success counters
//! - `EndpointState`: circuit-breaker state derived from those counters
//! - `HealthStatus`: what an endpoint reports about itself on `/api/health`
//!
//! Per endpoint: `Available -> (3 failures) -> CircuitOpen -> (5 minutes or a
//! forced reset) -> Available`.

mod endpoint_health;
mod status;

pub use endpoint_health::{
    CircuitPolicy, EndpointHealth, EndpointStats, FAILURE_THRESHOLD, RESET_TIMEOUT,
};
pub use status::{EndpointState, HealthStatus};
