//! Mine command implementation.

use super::{project_catalog, project_pages, project_synonyms};
use crate::cli::MineArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sasb_domain::{Candidate, PageContext};
use sasb_miner::{CandidateMiner, MetricPageMap};
use std::path::Path;
use std::sync::Arc;

/// Execute the mine command.
pub fn execute_mine(
    args: MineArgs,
    project: &Path,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let candidates = mine_candidates(&args, project, config)?;
    println!("{}", formatter.format_candidates(&candidates)?);
    Ok(())
}

/// Mine the requested pages and return the merged candidates.
pub fn mine_candidates(args: &MineArgs, project: &Path, config: &Config) -> Result<Vec<Candidate>> {
    let synonyms = Arc::new(project_synonyms(project)?);
    let pages = project_pages(project)?;
    let metric = project_catalog(project)?.descriptor(&args.metric);

    let selected: Vec<&PageContext> = match args.page {
        Some(page_no) => {
            let page = pages
                .iter()
                .find(|p| p.page == page_no)
                .ok_or_else(|| CliError::NotFound(format!("page {}", page_no)))?;
            vec![page]
        }
        None => {
            // Relevant pages come back ascending
            let map = MetricPageMap::build(&synonyms, &pages);
            map.pages_for(&args.metric)
                .iter()
                .filter_map(|no| pages.iter().find(|p| p.page == *no))
                .collect()
        }
    };

    let miner = CandidateMiner::from_config(synonyms, &config.miner_config(&args.llm)?);
    let mut candidates: Vec<Candidate> = selected
        .into_iter()
        .flat_map(|page| miner.combined(&args.metric, &metric, page))
        .collect();

    if let Some(limit) = args.limit {
        candidates.truncate(limit);
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LlmArgs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::write(
            dir.path().join("pages/metadata.json"),
            r#"[
                {"page": 1, "text": "Greenhouse gas emissions totalled 2.5 tCO2e", "image_path": "pages/1.png"},
                {"page": 2, "text": "Revenue was 12 % higher", "image_path": "pages/2.png"},
                {"page": 3, "text": "GHG emissions intensity 0.4 tCO2e", "image_path": "pages/3.png"}
            ]"#,
        )
        .unwrap();
        dir
    }

    fn args(page: Option<u32>, limit: Option<usize>) -> MineArgs {
        MineArgs {
            metric: "TC-SC-110a.1".to_string(),
            page,
            limit,
            llm: LlmArgs {
                heuristic_only: true,
                ..LlmArgs::default()
            },
        }
    }

    #[test]
    fn test_mines_relevant_pages() {
        let dir = project();
        let candidates = mine_candidates(&args(None, None), dir.path(), &Config::default()).unwrap();
        let found: Vec<_> = candidates.iter().map(|c| (c.page, c.value.as_str())).collect();
        assert_eq!(found, vec![(1, "2.5"), (3, "0.4")]);
    }

    #[test]
    fn test_pages_mined_in_ascending_order() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::write(
            dir.path().join("pages/metadata.json"),
            r#"[
                {"page": 7, "text": "GHG emissions 7.5 tCO2e"},
                {"page": 2, "text": "Greenhouse gas emissions 2.5 tCO2e"},
                {"page": 4, "text": "GHG emissions 4.5 tCO2e"}
            ]"#,
        )
        .unwrap();

        let candidates = mine_candidates(&args(None, None), dir.path(), &Config::default()).unwrap();
        let pages: Vec<u32> = candidates.iter().map(|c| c.page).collect();
        assert_eq!(pages, vec![2, 4, 7]);
    }

    #[test]
    fn test_single_page_and_limit() {
        let dir = project();
        let candidates =
            mine_candidates(&args(Some(3), Some(5)), dir.path(), &Config::default()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].unit, "tCO2e");

        let limited = mine_candidates(&args(None, Some(1)), dir.path(), &Config::default()).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_irrelevant_page_is_empty() {
        let dir = project();
        let candidates =
            mine_candidates(&args(Some(2), None), dir.path(), &Config::default()).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_unknown_page() {
        let dir = project();
        assert!(matches!(
            mine_candidates(&args(Some(9), None), dir.path(), &Config::default()),
            Err(CliError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_metadata() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            mine_candidates(&args(None, None), dir.path(), &Config::default()),
            Err(CliError::Miner(_))
        ));
    }
}
