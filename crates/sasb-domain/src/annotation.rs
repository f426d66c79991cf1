//! Annotation module - human-confirmed records persisted per metric

use crate::{BBox, Category};
use serde::{Deserialize, Serialize};

/// A confirmed, human-reviewed record of a metric's value on a page
///
/// Annotations are appended to a [`MetricAnnotationFile`] and never mutated
/// once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// 1-based page number
    pub page: u32,

    /// Value as written in the report (numeral formatting preserved)
    pub value: String,

    /// Unit, possibly empty
    #[serde(default)]
    pub unit: String,

    /// Disclosure category
    #[serde(default)]
    pub category: Category,

    /// Whether the annotator considers the disclosure complete
    #[serde(default)]
    pub complete: bool,

    /// Evidence rectangles on the page image
    #[serde(default)]
    pub bboxes: Vec<BBox>,

    /// Reviewer confirmed the category
    #[serde(default)]
    pub cat_ok: bool,

    /// Reviewer confirmed the unit
    #[serde(default)]
    pub unit_ok: bool,

    /// Seconds since the Unix epoch when the annotation was made
    #[serde(default)]
    pub timestamp: f64,
}

impl Annotation {
    /// Create a quantitative annotation with no evidence boxes and no
    /// reviewer confirmations
    pub fn new(page: u32, value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            page,
            value: value.into(),
            unit: unit.into(),
            category: Category::Quantitative,
            complete: false,
            bboxes: Vec::new(),
            cat_ok: false,
            unit_ok: false,
            timestamp: 0.0,
        }
    }

    /// Validate that the annotation can be persisted
    pub fn validate(&self) -> Result<(), String> {
        if self.value.trim().is_empty() {
            return Err("value is empty".to_string());
        }
        if self.page == 0 {
            return Err("page numbers are 1-based".to_string());
        }
        for (idx, bbox) in self.bboxes.iter().enumerate() {
            if bbox.as_array().iter().any(|c| !c.is_finite()) {
                return Err(format!("bbox {} has a non-finite coordinate", idx));
            }
        }
        Ok(())
    }
}

/// The persisted unit: every annotation recorded for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAnnotationFile {
    /// Metric identifier, matches the file name it is stored under
    pub metric_id: String,

    /// Annotations in insertion order
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MetricAnnotationFile {
    /// Create an empty record for a metric
    pub fn new(metric_id: impl Into<String>) -> Self {
        Self {
            metric_id: metric_id.into(),
            annotations: Vec::new(),
        }
    }

    /// Distinct annotated pages, ascending
    pub fn pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.annotations.iter().map(|a| a.page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }

    /// Annotations on a given page
    pub fn annotations_on(&self, page: u32) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.page == page)
    }
}
