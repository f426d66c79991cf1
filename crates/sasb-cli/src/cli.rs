//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SASB annotation toolkit - mine, record and export ESG metric annotations.
#[derive(Debug, Parser)]
#[command(name = "sasb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project directory
    #[arg(short, long, global = true, default_value = "new_project")]
    pub project: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Suggest candidate values for a metric
    Mine(MineArgs),

    /// Map metrics to the pages that mention them
    Pages(PagesArgs),

    /// Record a confirmed annotation
    Annotate(AnnotateArgs),

    /// Show stored annotations
    Show(ShowArgs),

    /// Export annotations to CSV and metadata JSON
    Export(ExportArgs),
}

/// External extraction settings; each overrides the `[llm]` config section.
#[derive(Debug, Default, clap::Args)]
pub struct LlmArgs {
    /// Extraction service base URL
    #[arg(long, env = "SASB_LLM_BASE_URL")]
    pub llm_base_url: Option<String>,

    /// Extraction service API key
    #[arg(long, env = "SASB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Extraction model identifier
    #[arg(long, env = "SASB_LLM_MODEL")]
    pub llm_model: Option<String>,

    /// Skip the external service even when configured
    #[arg(long)]
    pub heuristic_only: bool,
}

/// Arguments for the mine command.
#[derive(Debug, Parser)]
pub struct MineArgs {
    /// Metric id (e.g. TC-SC-110a.1)
    pub metric: String,

    /// Page to mine; defaults to every page mentioning the metric
    #[arg(long)]
    pub page: Option<u32>,

    /// Maximum number of candidates to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

/// Arguments for the pages command.
#[derive(Debug, Parser)]
pub struct PagesArgs {
    /// Only show pages for this metric
    #[arg(short, long)]
    pub metric: Option<String>,

    /// Only show metrics likely on this page
    #[arg(long, conflicts_with = "metric")]
    pub page: Option<u32>,
}

/// Arguments for the annotate command.
#[derive(Debug, Parser)]
pub struct AnnotateArgs {
    /// Metric id
    pub metric: String,

    /// 1-based page number
    pub page: u32,

    /// Value as written in the report
    pub value: String,

    /// Unit
    #[arg(short, long, default_value = "")]
    pub unit: String,

    /// Disclosure category
    #[arg(long, value_enum, default_value = "quantitative")]
    pub category: CategoryArg,

    /// Mark the disclosure complete
    #[arg(long)]
    pub complete: bool,

    /// Evidence box as x1,y1,x2,y2 (repeatable)
    #[arg(short, long = "bbox")]
    pub bboxes: Vec<String>,

    /// Category confirmed by the reviewer
    #[arg(long)]
    pub cat_ok: bool,

    /// Unit confirmed by the reviewer
    #[arg(long)]
    pub unit_ok: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Metric id; without it every stored metric is summarized
    pub metric: Option<String>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Annotator id
    #[arg(long, default_value = "annotator")]
    pub uid: String,

    /// Company id for bbox rows; defaults to the company
    #[arg(long)]
    pub cid: Option<String>,

    /// Reporting company
    #[arg(long, default_value = "tsmc")]
    pub company: String,

    /// Source PDF to fingerprint; without it session metadata is written
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Reporting year
    #[arg(long, default_value = "2024")]
    pub year: i32,

    /// Report language
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Disclosure framework version
    #[arg(long, default_value = "1.0")]
    pub sasb_version: String,
}

/// Category argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CategoryArg {
    /// Numeric disclosure
    Quantitative,
    /// Narrative disclosure
    Discussion,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<CategoryArg> for sasb_domain::Category {
    fn from(category: CategoryArg) -> Self {
        match category {
            CategoryArg::Quantitative => sasb_domain::Category::Quantitative,
            CategoryArg::Discussion => sasb_domain::Category::Discussion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_command() {
        let cli = Cli::parse_from(["sasb", "mine", "TC-SC-110a.1", "--page", "4"]);
        assert_eq!(cli.project, PathBuf::from("new_project"));
        match cli.command {
            Command::Mine(args) => {
                assert_eq!(args.metric, "TC-SC-110a.1");
                assert_eq!(args.page, Some(4));
                assert!(!args.llm.heuristic_only);
            }
            _ => panic!("Expected Mine command"),
        }
    }

    #[test]
    fn test_annotate_command() {
        let cli = Cli::parse_from([
            "sasb",
            "--project",
            "p",
            "annotate",
            "TC-SC-110a.1",
            "12",
            "1,234",
            "--unit",
            "tCO2e",
            "--bbox",
            "1,2,3,4",
            "--bbox",
            "5,6,7,8",
            "--cat-ok",
        ]);
        assert_eq!(cli.project, PathBuf::from("p"));
        match cli.command {
            Command::Annotate(args) => {
                assert_eq!(args.page, 12);
                assert_eq!(args.value, "1,234");
                assert_eq!(args.bboxes.len(), 2);
                assert!(args.cat_ok);
                assert!(!args.unit_ok);
                assert!(matches!(args.category, CategoryArg::Quantitative));
            }
            _ => panic!("Expected Annotate command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sasb", "show", "-f", "json", "-v", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::parse_from(["sasb", "export"]);
        match cli.command {
            Command::Export(args) => {
                assert_eq!(args.uid, "annotator");
                assert_eq!(args.company, "tsmc");
                assert_eq!(args.year, 2024);
                assert!(args.pdf.is_none());
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_pages_flags_conflict() {
        assert!(Cli::try_parse_from(["sasb", "pages", "--metric", "m", "--page", "1"]).is_err());
    }

    #[test]
    fn test_category_conversion() {
        let category: sasb_domain::Category = CategoryArg::Discussion.into();
        assert_eq!(category, sasb_domain::Category::Discussion);
    }
}
