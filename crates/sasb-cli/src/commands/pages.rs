//! Pages command implementation.

use super::{project_pages, project_synonyms, PAGE_MAP_FILE};
use crate::cli::PagesArgs;
use crate::error::Result;
use crate::output::Formatter;
use sasb_miner::MetricPageMap;
use std::path::Path;

/// Execute the pages command.
///
/// Rebuilds `metric_page_mapping.json` from the page metadata on every run.
pub fn execute_pages(args: PagesArgs, project: &Path, formatter: &Formatter) -> Result<()> {
    let map = build_page_map(project)?;

    if let Some(page) = args.page {
        println!("{}", formatter.format_metric_ids(&map.likely_metrics_for_page(page))?);
    } else if let Some(metric) = args.metric {
        let pages: Vec<String> = map.pages_for(&metric).iter().map(u32::to_string).collect();
        println!("{}", pages.join(" "));
    } else {
        println!("{}", formatter.format_page_map(&map)?);
    }
    Ok(())
}

/// Build the relevance map for a project and write it next to the project files.
pub fn build_page_map(project: &Path) -> Result<MetricPageMap> {
    let synonyms = project_synonyms(project)?;
    let pages = project_pages(project)?;
    let map = MetricPageMap::build(&synonyms, &pages);
    map.save(project.join(PAGE_MAP_FILE))?;
    Ok(map)
}
