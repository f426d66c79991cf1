//! Per-metric keyword tables used to decide page relevance

use crate::error::MinerError;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Immutable lookup from metric id to the phrases that signal it
///
/// Phrases are lower-cased and deduplicated at construction, so matching is
/// a plain substring test against lower-cased page text. Empty phrases are
/// dropped; they would make every page relevant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Build a table from `(metric_id, phrases)` pairs
    ///
    /// # Examples
    ///
    /// ```
    /// use sasb_miner::SynonymTable;
    ///
    /// let table = SynonymTable::from_pairs([("TC-SC-140a.1", vec!["Water Withdrawn"])]);
    /// assert!(table.has_synonym("TC-SC-140a.1", "Total WATER WITHDRAWN was 3 m3"));
    /// assert!(!table.has_synonym("TC-SC-140a.2", "Total water withdrawn"));
    /// ```
    pub fn from_pairs<I, M, P, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (M, P)>,
        M: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (metric_id, phrases) in pairs {
            let list = entries.entry(metric_id.into()).or_default();
            for phrase in phrases {
                let phrase = phrase.as_ref().trim().to_lowercase();
                if !phrase.is_empty() && !list.contains(&phrase) {
                    list.push(phrase);
                }
            }
        }
        Self { entries }
    }

    /// The built-in table covering the core semiconductor climate metrics
    pub fn defaults() -> Self {
        Self::from_pairs([
            ("TC-SC-110a.1", vec!["greenhouse gas", "ghg emissions"]),
            ("TC-SC-110a.2", vec!["renewable energy"]),
            ("TC-SC-130a.1", vec!["energy consumption", "energy use"]),
        ])
    }

    /// Parse a `metric_keywords.json` document: `{"metric_id": ["phrase", ...]}`
    pub fn from_json_str(json: &str) -> Result<Self, MinerError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(raw))
    }

    /// Load a keyword file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MinerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&contents)?;
        debug!(
            "Loaded {} metric keyword lists from {}",
            table.entries.len(),
            path.display()
        );
        Ok(table)
    }

    /// Load `path` if it exists, otherwise fall back to [`SynonymTable::defaults`]
    pub fn from_file_or_defaults<P: AsRef<Path>>(path: P) -> Result<Self, MinerError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::defaults())
        }
    }

    /// Whether any phrase registered for `metric_id` occurs in `text`
    ///
    /// Metrics with no registered phrases never match.
    pub fn has_synonym(&self, metric_id: &str, text: &str) -> bool {
        let Some(phrases) = self.entries.get(metric_id) else {
            return false;
        };
        let lowered = text.to_lowercase();
        phrases.iter().any(|phrase| lowered.contains(phrase.as_str()))
    }

    /// Registered phrases for a metric, in registration order
    pub fn phrases(&self, metric_id: &str) -> &[String] {
        self.entries
            .get(metric_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Metric ids with a registered list, ascending
    pub fn metric_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of metrics in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no metrics
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
