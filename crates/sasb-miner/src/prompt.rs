//! Structured request construction for external candidate mining

use sasb_domain::MetricDescriptor;
use serde_json::{json, Value};

/// System instruction sent with every candidate request
pub const CANDIDATE_SYSTEM: &str = "You are an assistant that finds SASB metrics in ESG report pages. \
     Always output strict JSON.";

/// Name the output schema is registered under
const SCHEMA_NAME: &str = "CandidateList";

/// JSON schema every provider answer must satisfy
///
/// Candidates require `page`, `score` and `category_pred`; `unit_pred`,
/// `value`, `spans` and `rationale` are optional.
pub fn candidate_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "candidates": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "page": {"type": "integer"},
                        "score": {"type": "number"},
                        "category_pred": {
                            "type": "string",
                            "enum": ["quantitative", "discussion"]
                        },
                        "unit_pred": {"type": "string"},
                        "value": {"type": "string"},
                        "spans": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "x1": {"type": "number"},
                                    "y1": {"type": "number"},
                                    "x2": {"type": "number"},
                                    "y2": {"type": "number"}
                                }
                            }
                        },
                        "rationale": {"type": "string"}
                    },
                    "required": ["page", "score", "category_pred"]
                }
            }
        },
        "required": ["candidates"]
    })
}

/// Builds the request body for one (metric, page) extraction
pub struct RequestBuilder<'a> {
    model: &'a str,
    metric: &'a MetricDescriptor,
    page_text: &'a str,
}

impl<'a> RequestBuilder<'a> {
    /// Create a new request builder
    pub fn new(model: &'a str, metric: &'a MetricDescriptor, page_text: &'a str) -> Self {
        Self {
            model,
            metric,
            page_text,
        }
    }

    /// The user payload describing the metric and the page
    pub fn user_content(&self) -> Value {
        json!({
            "metric_code": self.metric.metric_id,
            "metric_title": self.metric.title,
            "expected_category": self.metric.expected_category.as_str(),
            "expected_units": self.metric.expected_units,
            "page_no": self.metric.page_no,
            "page_text": self.page_text,
        })
    }

    /// Build the complete request body
    pub fn build(&self) -> Value {
        json!({
            "model": self.model,
            "input": [
                {"role": "system", "content": CANDIDATE_SYSTEM},
                {"role": "user", "content": self.user_content()},
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": candidate_schema(),
                },
            },
        })
    }
}
