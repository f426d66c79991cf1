//! Rule-based candidate mining using the number extractor and synonym table

use crate::numbers::find_numbers_and_units;
use crate::synonyms::SynonymTable;
use sasb_domain::{Candidate, Category, PageContext};
use tracing::debug;

/// Heuristic candidates for `metric_id` on `page`
///
/// Pages whose text carries none of the metric's synonyms yield nothing and
/// are not scanned for numbers at all. Otherwise every number found becomes
/// a quantitative candidate with no bbox and no score.
pub fn heuristic_candidates(
    synonyms: &SynonymTable,
    metric_id: &str,
    page: &PageContext,
) -> Vec<Candidate> {
    if !synonyms.has_synonym(metric_id, &page.text) {
        return Vec::new();
    }

    let candidates: Vec<Candidate> = find_numbers_and_units(&page.text)
        .map(|hit| Candidate {
            page: page.page,
            value: hit.value.to_string(),
            unit: hit.unit.to_string(),
            category: Category::Quantitative,
            score: None,
            bbox: None,
            rationale: None,
        })
        .collect();

    debug!(
        "Heuristic mining found {} candidates for {} on page {}",
        candidates.len(),
        metric_id,
        page.page
    );
    candidates
}
