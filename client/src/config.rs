//! # Client Configuration
//!
//! Settings loaded from environment variables (and a `.env` file if present).
//! Configuration is validated on load so a bad URL fails at startup rather than
//! on the first request.
//!
//! | variable | default |
//! |---|---|
//! | `REWEAR_API_URL` | `http://localhost:5001/api` |
//! | `REWEAR_UPLOAD_HOST` | `http://localhost:5001` |
//! | `REWEAR_HTTP_TIMEOUT_SECS` | `10` |
//! | `REWEAR_SEARCH_DEBOUNCE_MS` | `300` |

use std::env;
use std::time::Duration;

use crate::core::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_UPLOAD_HOST: &str = "http://localhost:5001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL, without trailing slash (e.g. `http://localhost:5001/api`)
    pub api_base_url: String,

    /// Host serving `/uploads/...`
    pub upload_host: String,

    /// Per-request timeout. A request that exceeds it fails as a network error
    /// instead of leaving the action busy forever.
    ///
    /// Valid range: 1-300 seconds
    pub request_timeout: Duration,

    /// Quiet period before a listing search is sent.
    ///
    /// Valid range: 0-5000 ms
    pub search_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            upload_host: DEFAULT_UPLOAD_HOST.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl ClientConfig {
    /// Load and validate configuration from the process environment.
    ///
    /// Binaries load `.env` once at startup, before logging and this.
    pub fn load() -> Result<Self, AppError> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from environment variables, applying defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_base_url = lookup("REWEAR_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let upload_host = lookup("REWEAR_UPLOAD_HOST")
            .unwrap_or_else(|| DEFAULT_UPLOAD_HOST.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = match lookup("REWEAR_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::Config(format!("REWEAR_HTTP_TIMEOUT_SECS must be a valid number: {e}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let debounce_ms: u64 = match lookup("REWEAR_SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AppError::Config(format!("REWEAR_SEARCH_DEBOUNCE_MS must be a valid number: {e}"))
            })?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        Ok(Self {
            api_base_url,
            upload_host,
            request_timeout: Duration::from_secs(timeout_secs),
            search_debounce: Duration::from_millis(debounce_ms),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), AppError> {
        check_http_url("REWEAR_API_URL", &self.api_base_url)?;
        check_http_url("REWEAR_UPLOAD_HOST", &self.upload_host)?;

        let secs = self.request_timeout.as_secs();
        if !(1..=300).contains(&secs) {
            return Err(AppError::Config(
                "REWEAR_HTTP_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        if self.search_debounce > Duration::from_millis(5000) {
            return Err(AppError::Config(
                "REWEAR_SEARCH_DEBOUNCE_MS must be at most 5000".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_http_url(name: &str, value: &str) -> Result<(), AppError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| AppError::Config(format!("{name} is not a valid URL ({value}): {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::Config(format!(
            "{name} must use http or https, got {other}"
        ))),
    }
}
