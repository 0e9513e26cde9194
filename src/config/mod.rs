//! Configuration module for Dinescout
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, layering environment overrides on top, and resolving the final
//! endpoint list the scraping client runs with.
//!
//! # Example
//!
//! ```no_run
//! use dinescout::config::load_settings;
//! use std::path::Path;
//!
//! let loaded = load_settings(Some(Path::new("dinescout.toml"))).unwrap();
//! println!("Using {} endpoints", loaded.settings.endpoints.len());
//! ```

mod env;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, ClientSettings, Config, EndpointSource, Environment, OutputConfig, SourceConfig,
    DEFAULT_ALLOWED_DOMAINS, DEFAULT_HEALTH_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export loading functions
pub use env::{
    apply_env_overrides, load_settings, resolve_settings, LoadedSettings, ENV_API_KEY, ENV_DATABASE_PATH,
    ENV_ENDPOINT, ENV_ENDPOINTS, ENV_ENVIRONMENT, ENV_TIMEOUT_SECS,
};
pub use parser::{hash_config_content, load_config, parse_config};
pub use validation::validate;
