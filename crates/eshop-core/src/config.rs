//! Configuration management for the e-shop dashboard

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

const fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// Load configuration from a file and `ESHOP__*` environment variables
    ///
    /// Without an explicit path, an `eshop.toml` in the working directory is used when
    /// present. Environment variables override file values, e.g.
    /// `ESHOP__API__BASE_URL`.
    ///
    /// Values are not validated here, so that command line overrides can still replace
    /// them; call [`validate`](Self::validate) once every layer is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = path.map_or_else(
            || config::File::with_name("eshop").required(false),
            |path| config::File::from(path).required(true),
        );

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("ESHOP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Check values that serde cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unusable base URL or a zero timeout.
    pub fn validate(&self) -> crate::Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            crate::Error::configuration(format!(
                "invalid api.base_url '{}': {e}",
                self.api.base_url
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(crate::Error::configuration(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api.timeout_seconds == 0 {
            return Err(crate::Error::configuration(
                "api.timeout_seconds must be greater than zero",
            ));
        }

        Ok(())
    }
}
