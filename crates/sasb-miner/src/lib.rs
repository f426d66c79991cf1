//! SASB Candidate Miner
//!
//! Suggests candidate values for a (metric, page) pair.
//!
//! # Overview
//!
//! Two sources feed the annotator's candidate list:
//!
//! - a heuristic miner that scans page text for numbers followed by known
//!   ESG units, gated by a per-metric synonym table;
//! - an optional external text-understanding capability that receives a
//!   structured request and answers with scored candidates.
//!
//! The merger unions both and ranks them by score. Mining never fails: an
//! unreachable or misbehaving provider degrades to heuristic-only output.
//!
//! # Architecture
//!
//! ```text
//! page text ─┬─ SynonymTable ─┐
//!            └─ numbers ──────┴─ heuristic ─┐
//!                                           ├─ combined (sorted by score)
//! MetricDescriptor ─ RequestBuilder ─ ExternalExtractor ─┘
//! ```
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use sasb_domain::{Category, MetricDescriptor, PageContext};
//! use sasb_llm::MockProvider;
//! use sasb_miner::{CandidateMiner, ExternalExtractor, SynonymTable};
//!
//! let synonyms = Arc::new(SynonymTable::defaults());
//! let external = ExternalExtractor::new(MockProvider::default(), "model-x");
//! let miner = CandidateMiner::new(synonyms, external);
//!
//! let metric = MetricDescriptor::new("TC-SC-110a.1", "Scope 1 emissions", Category::Quantitative);
//! let page = PageContext::new(1, "Greenhouse gas emissions totalled 2.5 tCO2e");
//!
//! let candidates = miner.combined("TC-SC-110a.1", &metric, &page);
//! assert_eq!(candidates[0].value, "2.5");
//! assert_eq!(candidates[0].unit, "tCO2e");
//! assert_eq!(candidates[0].score, Some(0.5));
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod heuristics;
mod miner;
mod numbers;
mod pages;
mod parser;
mod prompt;
mod synonyms;


pub use client::{ExternalExtractor, ExtractionOutcome};
pub use config::MinerConfig;
pub use error::MinerError;
pub use heuristics::heuristic_candidates;
pub use miner::{CandidateMiner, DEFAULT_HEURISTIC_SCORE};
pub use numbers::{find_numbers_and_units, NumberHit, NumberHits, UNIT_WINDOW_CHARS};
pub use pages::{load_pages, MetricPageMap};
pub use parser::parse_candidates;
pub use prompt::{candidate_schema, RequestBuilder, CANDIDATE_SYSTEM};
pub use synonyms::SynonymTable;
