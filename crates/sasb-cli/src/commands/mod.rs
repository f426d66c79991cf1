//! Command implementations.

pub mod annotate;
pub mod export;
pub mod mine;
pub mod pages;
pub mod show;

pub use self::annotate::execute_annotate;
pub use self::export::execute_export;
pub use self::mine::execute_mine;
pub use self::pages::execute_pages;
pub use self::show::execute_show;

use crate::error::Result;
use sasb_domain::{MetricCatalog, PageContext};
use sasb_miner::{load_pages, SynonymTable};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Optional per-project keyword override
pub const KEYWORDS_FILE: &str = "metric_keywords.json";

/// Relevance map written by the pages command
pub const PAGE_MAP_FILE: &str = "metric_page_mapping.json";

/// Page contexts produced by preprocessing
pub fn metadata_path(project: &Path) -> PathBuf {
    project.join("pages").join("metadata.json")
}

/// Project keyword table, or the built-in one
pub fn project_synonyms(project: &Path) -> Result<SynonymTable> {
    Ok(SynonymTable::from_file_or_defaults(project.join(KEYWORDS_FILE))?)
}

/// Project page contexts
pub fn project_pages(project: &Path) -> Result<Vec<PageContext>> {
    Ok(load_pages(metadata_path(project))?)
}

/// Project metric map; empty when the project has none
pub fn project_catalog(project: &Path) -> Result<MetricCatalog> {
    let path = project.join(sasb_export::METRIC_MAP_FILE);
    if !path.exists() {
        debug!("No metric map at {}", path.display());
        return Ok(MetricCatalog::default());
    }
    Ok(MetricCatalog::from_json_str(&std::fs::read_to_string(path)?)?)
}
