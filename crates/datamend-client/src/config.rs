//! Client configuration.
//!
//! A single value: the backend base URL, sourced from the environment with
//! a local development default.

use std::env;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "DATAMEND_API_URL";

/// Base URL used when the environment does not provide one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration for the HTTP modification service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Loads configuration from the environment.
    ///
    /// Reads `DATAMEND_API_URL`, falling back to the local development
    /// endpoint when unset.
    pub fn from_env() -> Self {
        let api_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self { api_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
