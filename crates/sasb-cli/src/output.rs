//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sasb_domain::{Candidate, MetricAnnotationFile};
use sasb_export::{ExportSummary, MetricSummary};
use sasb_miner::MetricPageMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn join_pages(pages: &[u32]) -> String {
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn check(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format mined candidates.
    pub fn format_candidates(&self, candidates: &[Candidate]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(candidates)?),
            OutputFormat::Quiet => Ok(candidates
                .iter()
                .map(|c| c.value.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if candidates.is_empty() {
                    return Ok(self.colorize("No candidates found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Page", "Value", "Unit", "Category", "Score", "BBox"]);
                for (idx, c) in candidates.iter().enumerate() {
                    let score = c
                        .score
                        .map(|s| format!("{:.2}", s))
                        .unwrap_or_else(|| "-".to_string());
                    let bbox = c.bbox.map(|b| b.to_string()).unwrap_or_default();
                    builder.push_record([
                        (idx + 1).to_string(),
                        c.page.to_string(),
                        c.value.clone(),
                        c.unit.clone(),
                        c.category.to_string(),
                        score,
                        bbox,
                    ]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format the stored annotations of one metric.
    pub fn format_annotations(&self, record: &MetricAnnotationFile) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record
                .annotations
                .iter()
                .map(|a| a.value.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if record.annotations.is_empty() {
                    return Ok(self.colorize(
                        &format!("No annotations for {}.", record.metric_id),
                        "yellow",
                    ));
                }

                let mut builder = Builder::default();
                builder.push_record([
                    "Page", "Value", "Unit", "Category", "Complete", "Boxes", "Cat OK", "Unit OK",
                ]);
                for a in &record.annotations {
                    builder.push_record([
                        a.page.to_string(),
                        a.value.clone(),
                        a.unit.clone(),
                        a.category.to_string(),
                        check(a.complete).to_string(),
                        a.bboxes.len().to_string(),
                        check(a.cat_ok).to_string(),
                        check(a.unit_ok).to_string(),
                    ]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format per-metric summaries.
    pub fn format_summaries(&self, summaries: &[MetricSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = summaries
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "metric": s.metric_id,
                            "pages": s.pages,
                            "cat_ok": s.cat_ok,
                            "unit_ok": s.unit_ok,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| s.metric_id.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if summaries.is_empty() {
                    return Ok(self.colorize("No annotations stored.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Metric", "Pages", "Cat OK", "Unit OK"]);
                for s in summaries {
                    builder.push_record([
                        s.metric_id.clone(),
                        join_pages(&s.pages),
                        check(s.cat_ok).to_string(),
                        check(s.unit_ok).to_string(),
                    ]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format the metric-to-page map.
    pub fn format_page_map(&self, map: &MetricPageMap) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(map.to_json()?),
            OutputFormat::Quiet => Ok(map
                .iter()
                .map(|(metric, pages)| format!("{} {}", metric, join_pages(pages)))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Pages"]);
                for (metric, pages) in map.iter() {
                    builder.push_record([metric.to_string(), join_pages(pages)]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format a list of metric ids.
    pub fn format_metric_ids(&self, metric_ids: &[&str]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(metric_ids)?),
            _ => {
                if metric_ids.is_empty() && self.format == OutputFormat::Table {
                    return Ok(self.info("No metrics mention this page"));
                }
                Ok(metric_ids.join("\n"))
            }
        }
    }

    /// Format the files written by an export.
    pub fn export_result(&self, summary: &ExportSummary) -> String {
        let mut lines = vec![self.success(&format!(
            "Exported {} annotation(s) across {} metric(s)",
            summary.annotations, summary.metrics
        ))];
        for path in [
            &summary.bbox_rows,
            &summary.full_report_agg,
            &summary.single_page_pairs,
            &summary.metadata,
        ] {
            lines.push(format!("  {}", path.display()));
        }
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
