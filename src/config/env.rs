//! Environment overrides and settings resolution
//!
//! Values from the process environment (and a `.env` file, if present)
//! take precedence over the TOML file. The lookup is injected so the
//! override logic can be tested with a plain `HashMap`.

use crate::config::parser::{hash_config_content, parse_config};
use crate::config::types::{ClientSettings, Config, EndpointSource, Environment};
use crate::config::validation::validate;
use crate::ConfigError;
use std::env::VarError;
use std::path::Path;
use std::time::Duration;

pub const ENV_ENDPOINTS: &str = "DINESCOUT_API_ENDPOINTS";
pub const ENV_ENDPOINT: &str = "DINESCOUT_API_ENDPOINT";
pub const ENV_API_KEY: &str = "DINESCOUT_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "DINESCOUT_TIMEOUT_SECS";
pub const ENV_ENVIRONMENT: &str = "DINESCOUT_ENV";
pub const ENV_DATABASE_PATH: &str = "DINESCOUT_DATABASE_PATH";

/// Result of `load_settings`
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub config: Config,
    pub settings: ClientSettings,
    /// SHA-256 of the config file text that was parsed, when a file was given
    pub config_hash: Option<String>,
}

/// Loads the configuration file (if any), applies environment overrides,
/// validates the result and resolves it into client settings.
///
/// Calls `dotenvy::dotenv().ok()` first so a local `.env` file is honoured.
/// The file is read once; the reported hash covers exactly that text.
pub fn load_settings(path: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    dotenvy::dotenv().ok();

    let (mut config, config_hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            (parse_config(&content)?, Some(hash_config_content(&content)))
        }
        None => (Config::default(), None),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key))?;
    validate(&config)?;

    let settings = resolve_settings(&config);
    Ok(LoadedSettings {
        config,
        settings,
        config_hash,
    })
}

/// Applies environment overrides to a parsed configuration
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let get = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(list) = get(ENV_ENDPOINTS) {
        config.api.endpoints = split_endpoint_list(&list);
    }

    if let Some(endpoint) = get(ENV_ENDPOINT) {
        config.api.endpoint = Some(endpoint);
    }

    if let Some(key) = get(ENV_API_KEY) {
        config.api.api_key = Some(key);
    }

    if let Some(raw) = get(ENV_TIMEOUT_SECS) {
        config.api.timeout_secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: ENV_TIMEOUT_SECS.to_string(),
            reason: e.to_string(),
        })?;
    }

    if let Some(env) = get(ENV_ENVIRONMENT) {
        config.api.environment = Environment::from_name(&env);
    }

    if let Some(path) = get(ENV_DATABASE_PATH) {
        config.output.database_path = path;
    }

    Ok(())
}

/// Resolves the endpoint list and timings the client will run with
///
/// Endpoints come from the multi-endpoint list, else the single endpoint,
/// else the environment's default list.
pub fn resolve_settings(config: &Config) -> ClientSettings {
    let api = &config.api;

    let (endpoints, endpoint_source) = if !api.endpoints.is_empty() {
        (api.endpoints.clone(), EndpointSource::MultiEndpoint)
    } else if let Some(endpoint) = &api.endpoint {
        (vec![endpoint.clone()], EndpointSource::SingleEndpoint)
    } else {
        (
            api.environment.default_endpoints(),
            EndpointSource::Default(api.environment),
        )
    };

    ClientSettings {
        endpoints: endpoints
            .iter()
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .collect(),
        endpoint_source,
        api_key: api.api_key.clone().filter(|k| !k.is_empty()),
        timeout: Duration::from_secs(api.timeout_secs),
        retry_delay: Duration::from_millis(api.retry_delay_ms),
        health_timeout: Duration::from_secs(api.health_timeout_secs),
        user_agent: api.user_agent.clone(),
        allowed_domains: config.source.allowed_domains.clone(),
        environment: api.environment,
    }
}

/// Splits a comma-separated endpoint list, dropping blanks
fn split_endpoint_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
