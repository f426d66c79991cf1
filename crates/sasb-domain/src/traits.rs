//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Annotation, MetricAnnotationFile};
use serde_json::Value;

/// A text-understanding capability that answers structured extraction requests
///
/// Implemented by the infrastructure layer (sasb-llm). The request body is
/// identical whichever provider backs it, so providers can be swapped freely.
pub trait ExtractionBackend {
    /// Error type for backend operations
    type Error;

    /// Submit a request body and return the raw response body
    fn submit(&self, body: &Value) -> Result<String, Self::Error>;
}

/// Durable per-metric storage of confirmed annotations
///
/// Implemented by the infrastructure layer (sasb-store). Records are
/// append-only: nothing in this interface removes an annotation.
pub trait AnnotationRepository {
    /// Error type for repository operations
    type Error;

    /// Load the record for a metric; an unannotated metric yields an empty record
    fn load(&self, metric_id: &str) -> Result<MetricAnnotationFile, Self::Error>;

    /// Replace the stored record for `record.metric_id`
    fn save(&self, record: &MetricAnnotationFile) -> Result<(), Self::Error>;

    /// Append one annotation to a metric's record
    fn add_annotation(&self, metric_id: &str, annotation: Annotation) -> Result<(), Self::Error>;

    /// Every stored record, in storage order
    fn records(&self) -> Result<Vec<MetricAnnotationFile>, Self::Error>;
}
