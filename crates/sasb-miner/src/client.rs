//! Fail-soft client for the external extraction capability

use crate::config::MinerConfig;
use crate::parser::parse_candidates;
use crate::prompt::RequestBuilder;
use sasb_domain::traits::ExtractionBackend;
use sasb_domain::{Candidate, MetricDescriptor};
use sasb_llm::ResponsesProvider;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// What an external extraction attempt produced
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The provider answered with schema-conforming candidates
    Candidates(Vec<Candidate>),
    /// Endpoint, credential or model is missing; nothing was sent
    Unconfigured,
    /// The request was sent but failed
    Failed(String),
}

impl ExtractionOutcome {
    /// Candidates on success, empty otherwise
    pub fn into_candidates(self) -> Vec<Candidate> {
        match self {
            ExtractionOutcome::Candidates(candidates) => candidates,
            ExtractionOutcome::Unconfigured | ExtractionOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Sends extraction requests to an optional backend
///
/// With no backend configured every call returns immediately with
/// [`ExtractionOutcome::Unconfigured`].
pub struct ExternalExtractor<B> {
    backend: Option<B>,
    model: String,
}

impl ExternalExtractor<ResponsesProvider> {
    /// Build the HTTP-backed extractor from configuration
    ///
    /// Returns an unconfigured extractor when any of endpoint, credential or
    /// model is absent.
    pub fn from_config(config: &MinerConfig) -> Self {
        let Some((base_url, api_key, model)) = config.llm_settings() else {
            info!("External extraction not configured; mining is heuristic-only");
            return Self::unconfigured();
        };

        match ResponsesProvider::with_timeout(base_url, api_key, config.request_timeout()) {
            Ok(provider) => Self::new(provider, model),
            Err(e) => {
                warn!("Failed to set up extraction provider: {}", e);
                Self::unconfigured()
            }
        }
    }
}

impl<B> ExternalExtractor<B> {
    /// Create an extractor that sends requests for `model` to `backend`
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend: Some(backend),
            model: model.into(),
        }
    }

    /// Create an extractor with no backend
    pub fn unconfigured() -> Self {
        Self {
            backend: None,
            model: String::new(),
        }
    }

    /// Whether a backend is present
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl<B> ExternalExtractor<B>
where
    B: ExtractionBackend,
    B::Error: Display,
{
    /// Run one extraction and report exactly what happened
    pub fn try_extract(&self, metric: &MetricDescriptor, page_text: &str) -> ExtractionOutcome {
        let Some(backend) = &self.backend else {
            return ExtractionOutcome::Unconfigured;
        };

        let body = RequestBuilder::new(&self.model, metric, page_text).build();
        debug!(
            "Requesting candidates for {} (page text {} chars)",
            metric.metric_id,
            page_text.len()
        );

        let response = match backend.submit(&body) {
            Ok(response) => response,
            Err(e) => return ExtractionOutcome::Failed(e.to_string()),
        };

        match parse_candidates(&response) {
            Ok(candidates) => {
                debug!("Provider returned {} candidates", candidates.len());
                ExtractionOutcome::Candidates(candidates)
            }
            Err(e) => ExtractionOutcome::Failed(e.to_string()),
        }
    }

    /// Candidates from the provider, or none on any failure
    pub fn extract(&self, metric: &MetricDescriptor, page_text: &str) -> Vec<Candidate> {
        let outcome = self.try_extract(metric, page_text);
        if let ExtractionOutcome::Failed(reason) = &outcome {
            warn!(
                "External extraction for {} failed, continuing without it: {}",
                metric.metric_id, reason
            );
        }
        outcome.into_candidates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sasb_domain::Category;
    use sasb_llm::MockProvider;

    fn metric() -> MetricDescriptor {
        MetricDescriptor::new("TC-SC-110a.1", "Scope 1", Category::Quantitative).with_page(4)
    }

    #[test]
    fn test_unconfigured_returns_empty_without_io() {
        let extractor: ExternalExtractor<MockProvider> = ExternalExtractor::unconfigured();
        assert!(!extractor.is_configured());
        assert_eq!(extractor.try_extract(&metric(), "text"), ExtractionOutcome::Unconfigured);
        assert!(extractor.extract(&metric(), "text").is_empty());
    }

    #[test]
    fn test_from_config_missing_model_is_unconfigured() {
        let config = MinerConfig {
            llm_base_url: Some("http://localhost:1".to_string()),
            api_key: Some("k".to_string()),
            llm_model: None,
            ..MinerConfig::default()
        };
        let extractor = ExternalExtractor::from_config(&config);
        assert!(!extractor.is_configured());
        assert!(extractor.extract(&metric(), "text").is_empty());
    }

    #[test]
    fn test_from_config_fully_configured() {
        let config = MinerConfig {
            llm_base_url: Some("http://localhost:1".to_string()),
            api_key: Some("k".to_string()),
            llm_model: Some("model-x".to_string()),
            ..MinerConfig::default()
        };
        let extractor = ExternalExtractor::from_config(&config);
        assert!(extractor.is_configured());
        assert_eq!(extractor.model(), "model-x");
    }

    #[test]
    fn test_successful_extraction() {
        let provider = MockProvider::new(
            r#"{"candidates": [{"page": 4, "score": 0.8, "category_pred": "quantitative", "value": "7", "unit_pred": "%"}]}"#,
        );
        let extractor = ExternalExtractor::new(provider.clone(), "model-x");

        let candidates = extractor.extract(&metric(), "page text");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].unit, "%");

        let request = provider.last_request().unwrap();
        assert_eq!(request["model"], "model-x");
        assert_eq!(request["input"][1]["content"]["page_text"], "page text");
        assert_eq!(request["input"][1]["content"]["page_no"], 4);
    }

    #[test]
    fn test_backend_error_is_reported_then_swallowed() {
        let extractor = ExternalExtractor::new(MockProvider::failing("connection reset"), "m");
        match extractor.try_extract(&metric(), "t") {
            ExtractionOutcome::Failed(reason) => assert!(reason.contains("connection reset")),
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert!(extractor.extract(&metric(), "t").is_empty());
    }

    #[test]
    fn test_invalid_json_is_swallowed() {
        let extractor = ExternalExtractor::new(MockProvider::new("<html>502</html>"), "m");
        assert!(matches!(
            extractor.try_extract(&metric(), "t"),
            ExtractionOutcome::Failed(_)
        ));
        assert!(extractor.extract(&metric(), "t").is_empty());
    }

    #[test]
    fn test_schema_violation_is_swallowed() {
        let extractor = ExternalExtractor::new(
            MockProvider::new(r#"{"candidates": [{"page": 1, "value": "3"}]}"#),
            "m",
        );
        assert!(extractor.extract(&metric(), "t").is_empty());
    }
}
