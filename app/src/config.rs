//! Configuration management for Essential Todos.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default API root (a public fake REST API serving `/todos`)
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the todos API (`TODOS_API_URL`)
    pub api_url: String,
    /// Seconds the demo waits for the first load (`TODOS_LOAD_TIMEOUT`)
    pub load_timeout: u64,
    /// Tracing filter directive (`RUST_LOG`)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup("TODOS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            load_timeout: lookup("TODOS_LOAD_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// How long the demo waits for the first load
    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
