//! Page metadata loading and the metric-to-page relevance map

use crate::error::MinerError;
use crate::synonyms::SynonymTable;
use sasb_domain::PageContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Read the page contexts written by preprocessing (`pages/metadata.json`)
pub fn load_pages<P: AsRef<Path>>(path: P) -> Result<Vec<PageContext>, MinerError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let pages: Vec<PageContext> = serde_json::from_str(&contents)?;
    debug!("Loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// For each metric, the pages whose text carries one of its synonyms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricPageMap {
    metric_page_mapping: BTreeMap<String, Vec<u32>>,
}

impl MetricPageMap {
    /// Scan `pages` once per registered metric
    ///
    /// Every metric in `synonyms` gets an entry, possibly empty. Page lists
    /// are sorted and free of duplicates.
    pub fn build(synonyms: &SynonymTable, pages: &[PageContext]) -> Self {
        let mut metric_page_mapping = BTreeMap::new();
        for metric_id in synonyms.metric_ids() {
            let mut matched: Vec<u32> = pages
                .iter()
                .filter(|page| synonyms.has_synonym(metric_id, &page.text))
                .map(|page| page.page)
                .collect();
            matched.sort_unstable();
            matched.dedup();
            metric_page_mapping.insert(metric_id.to_string(), matched);
        }

        let map = Self {
            metric_page_mapping,
        };
        info!(
            "Mapped {} metrics across {} pages",
            map.metric_page_mapping.len(),
            pages.len()
        );
        map
    }

    /// Pages relevant to `metric_id`; empty for unknown metrics
    pub fn pages_for(&self, metric_id: &str) -> &[u32] {
        self.metric_page_mapping
            .get(metric_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Metrics whose relevant pages include `page`, in metric id order
    pub fn likely_metrics_for_page(&self, page: u32) -> Vec<&str> {
        self.metric_page_mapping
            .iter()
            .filter(|(_, pages)| pages.contains(&page))
            .map(|(metric_id, _)| metric_id.as_str())
            .collect()
    }

    /// Iterate over `(metric_id, pages)` entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.metric_page_mapping
            .iter()
            .map(|(metric_id, pages)| (metric_id.as_str(), pages.as_slice()))
    }

    /// Number of metrics in the map
    pub fn len(&self) -> usize {
        self.metric_page_mapping.len()
    }

    /// Whether the map has no metrics
    pub fn is_empty(&self) -> bool {
        self.metric_page_mapping.is_empty()
    }

    /// Serialize as `{"metric_page_mapping": {...}}`
    pub fn to_json(&self) -> Result<String, MinerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a `metric_page_mapping.json` document
    pub fn from_json_str(json: &str) -> Result<Self, MinerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the map to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MinerError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!("Wrote metric page mapping to {}", path.display());
        Ok(())
    }

    /// Read a map previously written with [`MetricPageMap::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MinerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pages() -> Vec<PageContext> {
        vec![
            PageContext::new(3, "Our GHG emissions and energy use fell."),
            PageContext::new(1, "Greenhouse gas inventory"),
            PageContext::new(2, "Board of directors"),
        ]
    }

    #[test]
    fn test_build_sorts_pages() {
        let map = MetricPageMap::build(&SynonymTable::defaults(), &pages());
        assert_eq!(map.len(), 3);
        assert_eq!(map.pages_for("TC-SC-110a.1"), &[1, 3]);
        assert_eq!(map.pages_for("TC-SC-130a.1"), &[3]);
        assert!(map.pages_for("TC-SC-110a.2").is_empty());
        assert!(map.pages_for("unknown").is_empty());
    }

    #[test]
    fn test_likely_metrics_for_page() {
        let map = MetricPageMap::build(&SynonymTable::defaults(), &pages());
        assert_eq!(map.likely_metrics_for_page(3), vec!["TC-SC-110a.1", "TC-SC-130a.1"]);
        assert_eq!(map.likely_metrics_for_page(1), vec!["TC-SC-110a.1"]);
        assert!(map.likely_metrics_for_page(2).is_empty());
    }

    #[test]
    fn test_json_is_wrapped() {
        let map = MetricPageMap::build(&SynonymTable::defaults(), &pages());
        let value: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();
        assert_eq!(
            value["metric_page_mapping"]["TC-SC-110a.1"],
            serde_json::json!([1, 3])
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metric_page_mapping.json");
        let map = MetricPageMap::build(&SynonymTable::defaults(), &pages());
        map.save(&path).unwrap();
        assert_eq!(MetricPageMap::load(&path).unwrap(), map);
    }

    #[test]
    fn test_load_pages_ignores_extra_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(
            &path,
            r#"[{"page": 1, "width": 612, "height": 792, "text": "a b", "ocr": "",
                 "image_path": "pages/1.png", "tokens": ["a", "b"]}]"#,
        )
        .unwrap();

        let pages = load_pages(&path).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "a b");
        assert_eq!(pages[0].width, Some(612));
    }

    #[test]
    fn test_load_pages_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_pages(dir.path().join("nope.json")),
            Err(MinerError::Io(_))
        ));
    }
}
