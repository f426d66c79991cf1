//! Parse provider output into candidates

use crate::error::MinerError;
use sasb_domain::{BBox, Candidate, Category};
use serde::Deserialize;
use serde_json::Value;

/// One entry of the provider's `candidates` array, as the schema defines it
#[derive(Debug, Deserialize)]
struct RawCandidate {
    page: u32,
    score: f64,
    category_pred: Category,
    #[serde(default)]
    unit_pred: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    spans: Vec<BBox>,
    #[serde(default)]
    rationale: Option<String>,
}

impl RawCandidate {
    fn validate(&self) -> Result<(), String> {
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(format!("score {} out of range [0.0, 1.0]", self.score));
        }
        Ok(())
    }

    fn into_candidate(self) -> Candidate {
        Candidate {
            page: self.page,
            value: self.value.unwrap_or_default(),
            unit: self.unit_pred.unwrap_or_default(),
            category: self.category_pred,
            score: Some(self.score),
            bbox: self.spans.into_iter().next(),
            rationale: self.rationale,
        }
    }
}

/// Parse a provider response body into candidates
///
/// The body must be a JSON object with a `candidates` array whose every
/// entry satisfies the candidate schema. A single bad entry rejects the
/// whole response.
pub fn parse_candidates(response: &str) -> Result<Vec<Candidate>, MinerError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| MinerError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let items = json
        .get("candidates")
        .and_then(Value::as_array)
        .ok_or_else(|| MinerError::InvalidFormat("Missing 'candidates' array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let raw = RawCandidate::deserialize(item)
                .map_err(|e| MinerError::InvalidFormat(format!("candidate {}: {}", idx, e)))?;
            raw.validate()
                .map_err(|e| MinerError::InvalidFormat(format!("candidate {}: {}", idx, e)))?;
            Ok(raw.into_candidate())
        })
        .collect()
}

/// Strip a markdown code fence some providers wrap JSON in
fn extract_json(response: &str) -> Result<&str, MinerError> {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return Ok(trimmed);
    }

    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .ok_or_else(|| MinerError::InvalidFormat("Empty code block".to_string()))?;
    Ok(body.trim_end().trim_end_matches("```").trim())
}
