//! Machine-suggested candidate values

use crate::{BBox, Category};
use serde::{Deserialize, Serialize};

/// A machine-suggested annotation awaiting human review
///
/// Candidates are transient; only an [`crate::Annotation`] derived from one
/// is ever persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// 1-based page number
    pub page: u32,

    /// Value as found in the text
    pub value: String,

    /// Unit, possibly empty
    pub unit: String,

    /// Predicted category
    pub category: Category,

    /// Relevance score in [0, 1]; heuristic candidates carry none until merged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Evidence location, when the source knows it
    pub bbox: Option<BBox>,

    /// Free-text justification from the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Candidate {
    /// Score used for ranking; a missing score ranks as 0
    pub fn rank_score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}
