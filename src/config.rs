//! Configuration
//!
//! Command line and environment settings. A `.env` file in the working
//! directory is loaded first, so every `env` fallback below can live there.

use clap::{Args, ValueEnum};
use reqwest::Url;
use thiserror::Error;

use crate::api::HttpCartApi;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is not an absolute `http(s)` URL.
    #[error("invalid base url `{0}`: expected an absolute http(s) url")]
    InvalidBaseUrl(String),
}

/// Where the cart endpoints live.
#[derive(Debug, Clone, Args)]
pub struct CartConfig {
    /// Base URL of the shop serving `/pluscart`, `/minuscart` and `/removecart`
    #[arg(long, env = "CART_BASE_URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,
}

impl CartConfig {
    /// Check the base URL and build an HTTP client for it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is relative or not http(s).
    pub fn api(&self) -> Result<HttpCartApi, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|_parse_error| ConfigError::InvalidBaseUrl(self.base_url.clone()))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        Ok(HttpCartApi::new(self.base_url.clone()))
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Load a `.env` file if one is present.
pub fn load_dotenv() {
    // A missing .env is not an error.
    _ = dotenvy::dotenv();
}
