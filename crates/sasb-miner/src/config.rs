//! Configuration for the miner

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the external extraction capability
///
/// All three of `llm_base_url`, `api_key` and `llm_model` must be present
/// (and non-blank) for the external path to run; otherwise mining is
/// heuristic-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerConfig {
    /// API base URL, e.g. `https://api.example.com/v1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_base_url: Option<String>,

    /// Bearer credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier sent in the request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,

    /// Maximum time for a single extraction call (seconds)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl MinerConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether endpoint, credential and model are all set
    pub fn is_llm_configured(&self) -> bool {
        self.llm_settings().is_some()
    }

    /// `(base_url, api_key, model)` when all three are set
    pub fn llm_settings(&self) -> Option<(&str, &str, &str)> {
        Some((
            present(&self.llm_base_url)?,
            present(&self.api_key)?,
            present(&self.llm_model)?,
        ))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if let Some(url) = present(&self.llm_base_url) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("llm_base_url must be an http(s) URL, got '{}'", url));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for MinerConfig {
    /// Heuristic-only configuration with the standard 30 second timeout
    fn default() -> Self {
        Self {
            llm_base_url: None,
            api_key: None,
            llm_model: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}
