//! SASB LLM Provider Layer
//!
//! Pluggable implementations of the `ExtractionBackend` trait from `sasb-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `ResponsesProvider`: OpenAI-compatible `/responses` endpoint over HTTP
//!
//! # Examples
//!
//! ```
//! use sasb_llm::MockProvider;
//! use sasb_domain::traits::ExtractionBackend;
//!
//! let provider = MockProvider::new(r#"{"candidates": []}"#);
//! let body = serde_json::json!({"model": "m"});
//! assert_eq!(provider.submit(&body).unwrap(), r#"{"candidates": []}"#);
//! ```

#![warn(missing_docs)]

pub mod responses;

use sasb_domain::traits::ExtractionBackend;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use responses::ResponsesProvider;

/// Errors that can occur while talking to an extraction provider
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The provider answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The provider answered but the body could not be read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock provider for deterministic testing
///
/// Returns a fixed response (or a fixed failure) without any network calls
/// and records every request body it receives.
///
/// # Examples
///
/// ```
/// use sasb_llm::MockProvider;
/// use sasb_domain::traits::ExtractionBackend;
///
/// let provider = MockProvider::failing("connection reset");
/// assert!(provider.submit(&serde_json::json!({})).is_err());
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: Result<String, String>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockProvider {
    /// Create a provider that answers every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider whose every request fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The most recent request body, if any
    pub fn last_request(&self) -> Option<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"candidates": []}"#)
    }
}

impl ExtractionBackend for MockProvider {
    type Error = LlmError;

    fn submit(&self, body: &Value) -> Result<String, Self::Error> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(body.clone());

        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(LlmError::Other(message.clone())),
        }
    }
}
