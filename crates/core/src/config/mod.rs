//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SOURCETAP_*)
//! 2. TOML config file (if SOURCETAP_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SOURCETAP_*)
/// 2. TOML config file (if SOURCETAP_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite download cache.
    ///
    /// Set via SOURCETAP_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL of the page-rendering reader proxy.
    ///
    /// The target URL is appended to this prefix verbatim.
    /// Set via SOURCETAP_READER_BASE_URL environment variable.
    #[serde(default = "default_reader_base_url")]
    pub reader_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SOURCETAP_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for reader-proxy requests in milliseconds.
    ///
    /// Set via SOURCETAP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of search results returned by query_docs.
    ///
    /// Set via SOURCETAP_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./cache.db")
}

fn default_reader_base_url() -> String {
    "https://r.jina.ai/".into()
}

fn default_user_agent() -> String {
    "sourcetap/0.1".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_results() -> usize {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            reader_base_url: default_reader_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_results: default_max_results(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SOURCETAP_`
    /// 2. TOML file from `SOURCETAP_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SOURCETAP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SOURCETAP_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
