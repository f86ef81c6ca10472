//! Runtime configuration.

use crate::client::DEFAULT_BASE_URL;

/// Configuration for the client, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the chat backend
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `TRICKLE_BASE_URL` overrides the default backend URL.
    pub fn from_env() -> Self {
        let base_url = std::env::var("TRICKLE_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}
