//! Metric reference data
//!
//! A project's `metric_sid_map.json` maps each metric id to its topic, SASB
//! id and expected category/unit. The core only reads it.

use crate::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while reading metric reference data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog is not valid JSON or has the wrong shape
    #[error("Invalid metric catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Identifies a disclosure requirement, as handed to the miners
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    /// Stable metric code, e.g. `TC-SC-110a.1`
    pub metric_id: String,
    /// Topic name
    pub topic: String,
    /// Human-readable title
    pub title: String,
    /// Category the disclosure is expected to have
    pub expected_category: Category,
    /// Units the value is expected in, most likely first
    pub expected_units: Vec<String>,
    /// Page the metric is expected on, if known
    pub page_no: Option<u32>,
}

impl MetricDescriptor {
    /// Create a descriptor with no topic, units or page hint
    pub fn new(
        metric_id: impl Into<String>,
        title: impl Into<String>,
        expected_category: Category,
    ) -> Self {
        Self {
            metric_id: metric_id.into(),
            topic: String::new(),
            title: title.into(),
            expected_category,
            expected_units: Vec::new(),
            page_no: None,
        }
    }

    /// Attach a page hint
    pub fn with_page(mut self, page_no: u32) -> Self {
        self.page_no = Some(page_no);
        self
    }

    /// Set the expected units
    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_units = units.into_iter().map(Into::into).collect();
        self
    }
}

/// One entry of `metric_sid_map.json`
///
/// `topic` and `sid` are numbers in some projects and strings in others, so
/// they are kept as raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricInfo {
    /// Topic code or name
    #[serde(default)]
    pub topic: Value,

    /// SASB identifier or description
    #[serde(default)]
    pub sid: Value,

    /// Category label, free-form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Expected unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Optional title; falls back to `sid` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MetricInfo {
    /// Topic rendered for tabular output, `default` when absent
    pub fn topic_text(&self, default: &str) -> String {
        value_text(&self.topic, default)
    }

    /// SASB id rendered for tabular output, `default` when absent
    pub fn sid_text(&self, default: &str) -> String {
        value_text(&self.sid, default)
    }
}

fn value_text(value: &Value, default: &str) -> String {
    match value {
        Value::Null => default.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read-only lookup of metric reference data, keyed by metric id
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    entries: BTreeMap<String, MetricInfo>,
}

impl MetricCatalog {
    /// Parse a `metric_sid_map.json` document
    ///
    /// # Examples
    ///
    /// ```
    /// use sasb_domain::MetricCatalog;
    ///
    /// let catalog = MetricCatalog::from_json_str(
    ///     r#"{"TC-SC-110a.1": {"topic": 110, "sid": 11001}}"#,
    /// ).unwrap();
    /// assert_eq!(catalog.get("TC-SC-110a.1").unwrap().topic_text("0"), "110");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, MetricInfo> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Build a catalog from entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, MetricInfo)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Look up a metric
    pub fn get(&self, metric_id: &str) -> Option<&MetricInfo> {
        self.entries.get(metric_id)
    }

    /// Metric ids in ascending order
    pub fn metric_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of metrics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no metrics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the descriptor handed to the miners.
    ///
    /// Metrics missing from the catalog get a bare descriptor (discussion
    /// category, no units) rather than an error; mining must not fail on
    /// incomplete reference data.
    pub fn descriptor(&self, metric_id: &str) -> MetricDescriptor {
        let Some(info) = self.entries.get(metric_id) else {
            return MetricDescriptor::new(metric_id, "", Category::Discussion);
        };

        let title = info
            .title
            .clone()
            .unwrap_or_else(|| info.sid_text(""));
        let expected_category = info
            .category
            .as_deref()
            .map(Category::from_label)
            .unwrap_or(Category::Discussion);
        let expected_units = info
            .unit
            .iter()
            .filter(|u| !u.is_empty() && u.as_str() != "N/A")
            .cloned()
            .collect();

        MetricDescriptor {
            metric_id: metric_id.to_string(),
            topic: info.topic_text(""),
            title,
            expected_category,
            expected_units,
            page_no: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "TC-SC-110a.1": {
            "topic": "Greenhouse Gas Emissions",
            "sid": "Gross global Scope 1 emissions",
            "category": "Quantitative",
            "unit": "Metric tons (t) CO2-e",
            "extra": [1, 2, 3]
        },
        "TC-SC-130a.1": {"topic": 130, "sid": 13001, "category": "Discussion and Analysis", "unit": "N/A"},
        "TC-SC-410a.1": {}
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = MetricCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        let ids: Vec<_> = catalog.metric_ids().collect();
        assert_eq!(ids, vec!["TC-SC-110a.1", "TC-SC-130a.1", "TC-SC-410a.1"]);
    }

    #[test]
    fn test_topic_and_sid_text() {
        let catalog = MetricCatalog::from_json_str(CATALOG).unwrap();
        let numeric = catalog.get("TC-SC-130a.1").unwrap();
        assert_eq!(numeric.topic_text("0"), "130");
        assert_eq!(numeric.sid_text("0"), "13001");

        let empty = catalog.get("TC-SC-410a.1").unwrap();
        assert_eq!(empty.topic_text("0"), "0");
        assert_eq!(empty.sid_text(""), "");
    }

    #[test]
    fn test_descriptor_from_entry() {
        let catalog = MetricCatalog::from_json_str(CATALOG).unwrap();
        let descriptor = catalog.descriptor("TC-SC-110a.1");
        assert_eq!(descriptor.title, "Gross global Scope 1 emissions");
        assert_eq!(descriptor.topic, "Greenhouse Gas Emissions");
        assert_eq!(descriptor.expected_category, Category::Quantitative);
        assert_eq!(descriptor.expected_units, vec!["Metric tons (t) CO2-e"]);

        let discussion = catalog.descriptor("TC-SC-130a.1");
        assert_eq!(discussion.expected_category, Category::Discussion);
        assert!(discussion.expected_units.is_empty());
    }

    #[test]
    fn test_descriptor_for_unknown_metric() {
        let catalog = MetricCatalog::default();
        let descriptor = catalog.descriptor("XX-000");
        assert_eq!(descriptor.metric_id, "XX-000");
        assert!(descriptor.title.is_empty());
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(MetricCatalog::from_json_str("[1, 2]").is_err());
    }
}
