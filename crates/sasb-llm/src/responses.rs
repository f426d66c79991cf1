//! Responses API Provider Implementation
//!
//! Sends extraction requests to an OpenAI-compatible `POST <base>/responses`
//! endpoint with bearer authentication.
//!
//! # Features
//!
//! - Blocking HTTP; the caller waits for each request in turn
//! - Hard per-request timeout (30 seconds by default)
//! - Single attempt, no retry loop
//!
//! # Examples
//!
//! ```no_run
//! use sasb_llm::ResponsesProvider;
//!
//! let provider = ResponsesProvider::new("https://api.example.com/v1", "sk-...").unwrap();
//! ```

use crate::LlmError;
use sasb_domain::traits::ExtractionBackend;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default timeout for extraction requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest error body kept in [`LlmError::Status`]
const MAX_ERROR_BODY: usize = 500;

/// Provider for OpenAI-compatible Responses endpoints
pub struct ResponsesProvider {
    base_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl ResponsesProvider {
    /// Create a provider with the default timeout
    ///
    /// # Parameters
    ///
    /// - `base_url`: API base, e.g. `https://api.example.com/v1`
    /// - `api_key`: bearer credential
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
            client,
        })
    }

    /// Endpoint requests are posted to
    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ExtractionBackend for ResponsesProvider {
    type Error = LlmError;

    fn submit(&self, body: &Value) -> Result<String, Self::Error> {
        let url = self.endpoint();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            if let Some((idx, _)) = text.char_indices().nth(MAX_ERROR_BODY) {
                text.truncate(idx);
            }
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        response.text().map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::InvalidResponse(format!("Failed to read body: {}", e))
            }
        })
    }
}
