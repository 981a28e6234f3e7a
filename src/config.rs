//! Configuration management for Gander
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{GanderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for Gander
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Mock authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the document QA backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP method used for `/remove_file`
    #[serde(default)]
    pub remove_method: RemoveMethod,

    /// Optional client-wide request timeout (seconds); unset means no timeout
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            remove_method: RemoveMethod::default(),
            timeout_seconds: None,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// HTTP method for the remove-file endpoint
///
/// The backend route is declared as POST; GET is kept for servers that
/// expose the route without a body-less POST.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemoveMethod {
    /// `POST /remove_file?file_name=...`
    #[default]
    Post,
    /// `GET /remove_file?file_name=...`
    Get,
}

impl RemoveMethod {
    /// Parse a remove method from a string ("post" or "get", case-insensitive)
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "get" => Ok(Self::Get),
            other => Err(format!("Unknown remove method: {}", other)),
        }
    }
}

/// Mock authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated login latency (milliseconds)
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Simulated logout latency (milliseconds)
    #[serde(default = "default_logout_delay_ms")]
    pub logout_delay_ms: u64,
}

fn default_login_delay_ms() -> u64 {
    1000
}

fn default_logout_delay_ms() -> u64 {
    500
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: default_login_delay_ms(),
            logout_delay_ms: default_logout_delay_ms(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GanderError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| GanderError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("GANDER_API_URL") {
            tracing::debug!(base_url = %base_url, "Env override: GANDER_API_URL");
            self.api.base_url = base_url;
        }

        if let Ok(method) = std::env::var("GANDER_REMOVE_METHOD") {
            match RemoveMethod::parse_str(&method) {
                Ok(m) => self.api.remove_method = m,
                Err(_) => tracing::warn!("Invalid GANDER_REMOVE_METHOD: {}", method),
            }
        }

        if let Ok(timeout) = std::env::var("GANDER_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid GANDER_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(delay) = std::env::var("GANDER_LOGIN_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.auth.login_delay_ms = value;
            } else {
                tracing::warn!("Invalid GANDER_LOGIN_DELAY_MS: {}", delay);
            }
        }

        if let Ok(delay) = std::env::var("GANDER_LOGOUT_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.auth.logout_delay_ms = value;
            } else {
                tracing::warn!("Invalid GANDER_LOGOUT_DELAY_MS: {}", delay);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            tracing::debug!("Using API URL override from CLI: {}", api_url);
            self.api.base_url = api_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL or the
    /// timeout is zero
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            GanderError::Config(format!(
                "Invalid api.base_url '{}': {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(GanderError::Config(format!(
                "api.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(GanderError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
