use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout for extraction calls (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default pause between failover attempts (milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Default timeout for `/api/health` probes (seconds)
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

/// Endpoint used when running locally with no endpoint configured
pub const DEVELOPMENT_ENDPOINTS: &[&str] = &["http://localhost:3001"];

/// Endpoints used in production when no endpoint is configured
pub const PRODUCTION_ENDPOINTS: &[&str] = &[
    "https://scraper-eu1.dinescout.app",
    "https://scraper-eu2.dinescout.app",
    "https://scraper-us1.dinescout.app",
];

/// Review-site domains accepted as extraction sources by default
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "*.tripadvisor.com",
    "*.tripadvisor.co.uk",
    "*.tripadvisor.de",
    "*.tripadvisor.fr",
    "*.tripadvisor.it",
    "*.tripadvisor.es",
];

/// Main configuration structure for Dinescout
///
/// Every section is optional in the TOML file; missing sections fall back
/// to their defaults and may be further overridden from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Deployment environment, which decides the default endpoint list
///
/// Only an explicit development name selects the local endpoint; unset or
/// unrecognised names (`staging`, `release`, ...) fall back to production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl Environment {
    /// Parses an environment name; anything other than development is production
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// The endpoint list used when nothing is configured explicitly
    pub fn default_endpoints(&self) -> Vec<String> {
        let list = match self {
            Self::Development => DEVELOPMENT_ENDPOINTS,
            Self::Production => PRODUCTION_ENDPOINTS,
        };
        list.iter().map(|s| s.to_string()).collect()
    }
}

/// Extraction API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Ordered list of interchangeable extraction endpoints
    #[serde(default)]
    pub endpoints: Vec<String>,

    /// Single endpoint override, used when `endpoints` is empty
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Key sent as `X-API-Key` with extraction requests
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Per-request timeout for extraction calls (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause between failover attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for health probes (seconds)
    #[serde(rename = "health-timeout-secs", default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    #[serde(default)]
    pub environment: Environment,

    /// User agent for requests made to the extraction API
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            endpoint: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
            environment: Environment::default(),
            user_agent: default_user_agent(),
        }
    }
}

/// Source review-site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Domain patterns (e.g., "*.tripadvisor.com") accepted as sources
    #[serde(rename = "allowed-domains", default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database holding saved restaurants
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Where the resolved endpoint list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSource {
    /// Explicit multi-endpoint list
    MultiEndpoint,
    /// Single endpoint override
    SingleEndpoint,
    /// Environment-dependent default list
    Default(Environment),
}

impl std::fmt::Display for EndpointSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiEndpoint => write!(f, "multi-endpoint list"),
            Self::SingleEndpoint => write!(f, "single endpoint"),
            Self::Default(env) => write!(f, "{} defaults", env.as_str()),
        }
    }
}

/// Fully resolved settings handed to the scraping client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoints: Vec<String>,
    pub endpoint_source: EndpointSource,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry_delay: Duration,
    pub health_timeout: Duration,
    pub user_agent: String,
    pub allowed_domains: Vec<String>,
    pub environment: Environment,
}

impl ClientSettings {
    /// Builds settings for an explicit endpoint list with default timings
    pub fn with_endpoints(endpoints: Vec<String>, api_key: Option<String>) -> Self {
        Self {
            endpoints,
            endpoint_source: EndpointSource::MultiEndpoint,
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
            user_agent: default_user_agent(),
            allowed_domains: default_allowed_domains(),
            environment: Environment::default(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn default_health_timeout_secs() -> u64 {
    DEFAULT_HEALTH_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("dinescout/{}", env!("CARGO_PKG_VERSION"))
}

fn default_allowed_domains() -> Vec<String> {
    DEFAULT_ALLOWED_DOMAINS.iter().map(|s| s.to_string()).collect()
}

fn default_database_path() -> String {
    "./dinescout.db".to_string()
}
