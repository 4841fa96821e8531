//! Configuration management for the Rice Retail Dashboard client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides such as `RICE__API__BASE_URL`

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Dashboard rendering configuration
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the analytics backend
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Session cookie forwarded on every request, e.g. `session=abc`
    #[serde(default)]
    pub session_cookie: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Rows shown in the recent entries table
    pub recent_limit: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("RICE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default("api.timeout_secs", 30)?
            .set_default("dashboard.recent_limit", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RICE__ prefix, __ between keys)
            .add_source(
                Environment::with_prefix("RICE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
            session_cookie: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { recent_limit: 5 }
    }
}
