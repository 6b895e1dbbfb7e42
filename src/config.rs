//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_ENDPOINT;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `http://localhost:5000`
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Endpoint path requests are posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Client-side routing
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// History base path the app is served under
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "/mortimer/".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Application shell
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Element selector the app attaches to
    #[serde(default = "default_mount_point")]
    pub mount_point: String,

    /// Location to open on start; defaults to the router base
    #[serde(default)]
    pub initial_path: Option<String>,
}

fn default_mount_point() -> String {
    "#app".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_point: default_mount_point(),
            initial_path: None,
        }
    }
}

/// Startup hydration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapConfig {
    /// Hold mount until the session list is loaded or has failed
    #[serde(default)]
    pub block_until_loaded: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("mortimer").join("config.toml")),
            Some(PathBuf::from("/etc/mortimer/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Location to open on start
    pub fn initial_path(&self) -> String {
        self.app
            .initial_path
            .clone()
            .unwrap_or_else(|| self.router.base_url.clone())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `MORTIMER_*` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = lookup("MORTIMER_API_URL") {
            self.api.url = url;
        }
        if let Some(endpoint) = lookup("MORTIMER_API_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        if let Some(timeout) = lookup("MORTIMER_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        // Router overrides
        if let Some(base) = lookup("MORTIMER_BASE_URL") {
            self.router.base_url = base;
        }

        // Logging overrides
        if let Some(level) = lookup("MORTIMER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("MORTIMER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Mortimer Configuration
#
# Environment variables override these settings:
# - MORTIMER_API_URL
# - MORTIMER_API_ENDPOINT
# - MORTIMER_API_TIMEOUT
# - MORTIMER_BASE_URL
# - MORTIMER_LOG_LEVEL
# - MORTIMER_LOG_FORMAT

[api]
# Backend origin
url = "http://localhost:5000"

# Endpoint all actions are posted to
endpoint = "/mortimer/api"

# Request timeout in seconds
request_timeout_secs = 30

[router]
# History base path the app is served under
base_url = "/mortimer/"

[app]
# Element the app attaches to
mount_point = "#app"

# Location opened on start (default: router base)
# initial_path = "/mortimer/sessions/Screening-20220617"

[bootstrap]
# Hold mount until the session list has loaded or failed
block_until_loaded = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
