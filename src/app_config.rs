// Centralized configuration - load all env vars once at startup.
// Provider credentials are optional: a missing key degrades only that
// provider to Unknown, never the whole pipeline.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

use crate::verifiers::{openphish, phishtank, safe_browsing, urlhaus};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Global application configuration loaded once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    // For tests, load .env file first
    #[cfg(test)]
    dotenv::dotenv().ok();

    AppConfig::from_env().expect("Failed to load configuration")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // Provider credentials
    pub phishtank_api_key: Option<String>,
    pub safe_browsing_api_key: Option<String>,

    // Provider endpoints (overridable for staging and tests)
    pub phishtank_api_url: String,
    pub urlhaus_api_url: String,
    pub openphish_feed_url: String,
    pub safe_browsing_api_url: String,

    // Verification
    pub verifier_timeout_seconds: u64,

    // Submission rate limiting: N submissions per window of W seconds
    pub user_rate_limit_n: u32,
    pub user_rate_limit_window: u64,

    // Alerting
    pub alert_dedup_window_hours: u32,
    pub broadcast_batch_size: usize,
    pub broadcast_sleep_ms: u64,

    // Report read path
    pub max_recent: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());

        let get_optional = |key: &str| env::var(key).ok().filter(|value| !value.is_empty());

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_u32_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_usize_or_default = |key: &str, default: &str| -> Result<usize, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid usize".to_string())
            })
        };

        Ok(Self {
            phishtank_api_key: get_optional("PHISHTANK_API_KEY"),
            safe_browsing_api_key: get_optional("SAFE_BROWSING_API_KEY"),

            phishtank_api_url: get_or_default("PHISHTANK_API_URL", phishtank::DEFAULT_API_URL),
            urlhaus_api_url: get_or_default("URLHAUS_API_URL", urlhaus::DEFAULT_API_URL),
            openphish_feed_url: get_or_default("OPENPHISH_FEED_URL", openphish::DEFAULT_FEED_URL),
            safe_browsing_api_url: get_or_default(
                "SAFE_BROWSING_API_URL",
                safe_browsing::DEFAULT_API_URL,
            ),

            verifier_timeout_seconds: parse_u64_or_default("VERIFIER_TIMEOUT_SECONDS", "12")?,

            user_rate_limit_n: parse_u32_or_default("USER_RATE_LIMIT_N", "5")?,
            user_rate_limit_window: parse_u64_or_default("USER_RATE_LIMIT_WINDOW", "60")?,

            alert_dedup_window_hours: parse_u32_or_default("ALERT_DEDUP_WINDOW_H", "24")?,
            broadcast_batch_size: parse_usize_or_default("BROADCAST_BATCH_SIZE", "25")?,
            broadcast_sleep_ms: parse_u64_or_default("BROADCAST_SLEEP_MS", "300")?,

            max_recent: parse_usize_or_default("MAX_RECENT", "25")?,
        })
    }
}
