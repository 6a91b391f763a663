// crates/client/src/settings.rs
//! Environment-driven configuration for the harness.
//!
//! The database credentials are only consulted by suites that seed rows
//! directly; API-only suites leave them unset.

use std::str::FromStr;
use std::time::Duration;

use crate::api::PollOptions;

/// Settings recognized by the harness, all overridable via environment
/// variables of the same (upper-cased) name.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub db_host: Option<String>,
    pub db_port: u16,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub service_provided_api_token: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub test_data_cleanup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            api_timeout: Duration::from_secs(30),
            db_host: None,
            db_port: 5432,
            db_name: None,
            db_user: None,
            db_password: None,
            service_provided_api_token: None,
            poll_interval: Duration::from_secs(5),
            max_poll_attempts: 120,
            test_data_cleanup: true,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env_var(name).and_then(|value| value.parse().ok())
}

impl Settings {
    /// Load settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env_var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_timeout: parse_env("API_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.api_timeout),
            db_host: env_var("DB_HOST"),
            db_port: parse_env("DB_PORT").unwrap_or(defaults.db_port),
            db_name: env_var("DB_NAME"),
            db_user: env_var("DB_USER"),
            db_password: env_var("DB_PASSWORD"),
            service_provided_api_token: env_var("SERVICE_PROVIDED_API_TOKEN"),
            poll_interval: parse_env("POLL_INTERVAL_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            max_poll_attempts: parse_env("MAX_POLL_ATTEMPTS").unwrap_or(defaults.max_poll_attempts),
            test_data_cleanup: parse_env("TEST_DATA_CLEANUP").unwrap_or(defaults.test_data_cleanup),
        }
    }

    /// Polling bounds derived from these settings.
    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: self.poll_interval,
            max_attempts: self.max_poll_attempts,
        }
    }
}
