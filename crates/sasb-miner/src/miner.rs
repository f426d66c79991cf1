//! Candidate mining entry point: heuristics, external extraction and merging

use crate::client::ExternalExtractor;
use crate::config::MinerConfig;
use crate::heuristics::heuristic_candidates;
use crate::synonyms::SynonymTable;
use sasb_domain::traits::ExtractionBackend;
use sasb_domain::{Candidate, MetricDescriptor, PageContext};
use sasb_llm::ResponsesProvider;
use std::fmt::Display;
use std::sync::Arc;
use tracing::info;

/// Score given to heuristic candidates when merged
pub const DEFAULT_HEURISTIC_SCORE: f64 = 0.5;

/// Suggests candidates for a (metric, page) pair
pub struct CandidateMiner<B = ResponsesProvider> {
    synonyms: Arc<SynonymTable>,
    external: ExternalExtractor<B>,
}

impl CandidateMiner<ResponsesProvider> {
    /// Create a miner whose external path is configured from `config`
    pub fn from_config(synonyms: Arc<SynonymTable>, config: &MinerConfig) -> Self {
        Self::new(synonyms, ExternalExtractor::from_config(config))
    }
}

impl<B> CandidateMiner<B>
where
    B: ExtractionBackend,
    B::Error: Display,
{
    /// Create a new miner
    pub fn new(synonyms: Arc<SynonymTable>, external: ExternalExtractor<B>) -> Self {
        Self { synonyms, external }
    }

    /// The synonym table in use
    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Whether the external path is configured
    pub fn has_external(&self) -> bool {
        self.external.is_configured()
    }

    /// Heuristic candidates only
    pub fn heuristic(&self, metric_id: &str, page: &PageContext) -> Vec<Candidate> {
        heuristic_candidates(&self.synonyms, metric_id, page)
    }

    /// External candidates only; empty on any failure
    pub fn llm(&self, metric: &MetricDescriptor, page_text: &str) -> Vec<Candidate> {
        self.external.extract(metric, page_text)
    }

    /// Heuristic and external candidates, ranked by score descending
    ///
    /// Heuristic candidates get [`DEFAULT_HEURISTIC_SCORE`] and come first,
    /// so on equal scores they stay ahead of external ones. When the
    /// descriptor carries no page hint, the page being mined is sent instead.
    pub fn combined(
        &self,
        metric_id: &str,
        metric: &MetricDescriptor,
        page: &PageContext,
    ) -> Vec<Candidate> {
        let mut results: Vec<Candidate> = self
            .heuristic(metric_id, page)
            .into_iter()
            .map(|mut candidate| {
                candidate.score.get_or_insert(DEFAULT_HEURISTIC_SCORE);
                candidate
            })
            .collect();
        let heuristic_count = results.len();

        let external = if metric.page_no.is_some() {
            self.llm(metric, &page.text)
        } else {
            let hinted = metric.clone().with_page(page.page);
            self.llm(&hinted, &page.text)
        };
        let external_count = external.len();
        results.extend(external);

        // Stable: equal scores keep insertion order
        results.sort_by(|a, b| b.rank_score().total_cmp(&a.rank_score()));

        info!(
            "Mined {} candidates for {} on page {} ({} heuristic, {} external)",
            results.len(),
            metric_id,
            page.page,
            heuristic_count,
            external_count
        );
        results
    }
}
