//! Dinescout: restaurant extraction client for a regional dining guide
//!
//! This crate sends TripAdvisor page URLs to one of several interchangeable
//! deployments of a remote extraction API, tracks per-endpoint health, and
//! fails over transparently when an endpoint misbehaves.

pub mod client;
pub mod config;
pub mod health;
pub mod models;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Dinescout operations
#[derive(Debug, Error)]
pub enum DineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] client::ScrapeError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("No URL was provided")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("URL does not point to a supported review site: {0}")]
    UnsupportedSource(String),
}

/// Result type alias for Dinescout operations
pub type Result<T> = std::result::Result<T, DineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use client::{ScrapeError, ScrapingClient};
pub use config::{ClientSettings, Config};
pub use health::{EndpointHealth, EndpointState};
pub use models::{ExtractedRestaurantData, ExtractionRequest, ScrapeOptions};
