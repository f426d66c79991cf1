//! Project exporter

use crate::error::ExportError;
use crate::metadata::{pdf_sha256, ExportMetadata, SessionMetadata};
use crate::tables::{
    bbox_rows, page_pairs, MetricSummary, AGG_HEADER, BBOX_HEADER, PAIRS_HEADER,
};
use sasb_domain::traits::AnnotationRepository;
use sasb_domain::{MetricAnnotationFile, MetricCatalog};
use sasb_store::AnnotationStore;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Metric reference data expected in the project directory
pub const METRIC_MAP_FILE: &str = "metric_sid_map.json";

/// Output directory under the project
pub const EXPORTS_DIR: &str = "exports";

/// Parameters for a complete export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Annotator id written to every bbox row
    pub uid: String,
    /// Company id written to every bbox row
    pub cid: String,
    /// Reporting company for the metadata record
    pub company: String,
    /// Source PDF; without it the session metadata variant is written
    pub pdf_path: Option<PathBuf>,
    /// Reporting year
    pub year: i32,
    /// Report language
    pub lang: String,
    /// Disclosure framework version tag
    pub sasb_version: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            uid: "annotator".to_string(),
            cid: "tsmc".to_string(),
            company: "tsmc".to_string(),
            pdf_path: None,
            year: 2024,
            lang: "en".to_string(),
            sasb_version: "1.0".to_string(),
        }
    }
}

/// Paths written by [`Exporter::export_all`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Per-bbox table
    pub bbox_rows: PathBuf,
    /// Per-metric aggregate table
    pub full_report_agg: PathBuf,
    /// Per-(metric, page) table
    pub single_page_pairs: PathBuf,
    /// Metadata record
    pub metadata: PathBuf,
    /// Metrics exported
    pub metrics: usize,
    /// Annotations exported
    pub annotations: usize,
}

/// Reads every stored metric record and writes flat reports
///
/// The exporter never modifies the repository.
pub struct Exporter<R = AnnotationStore> {
    repository: R,
    catalog: MetricCatalog,
    export_dir: PathBuf,
}

impl Exporter<AnnotationStore> {
    /// Open the exporter for a project directory
    ///
    /// Fails with [`ExportError::MissingMetricMap`] when `metric_sid_map.json`
    /// is absent. Creates `exports/` if needed.
    pub fn open<P: AsRef<Path>>(project_dir: P) -> Result<Self, ExportError> {
        let project_dir = project_dir.as_ref();
        let map_path = project_dir.join(METRIC_MAP_FILE);
        if !map_path.is_file() {
            return Err(ExportError::MissingMetricMap(map_path));
        }

        let catalog = MetricCatalog::from_json_str(&std::fs::read_to_string(&map_path)?)?;
        let store = AnnotationStore::open(project_dir)?;
        Self::new(store, catalog, project_dir.join(EXPORTS_DIR))
    }
}

impl<R> Exporter<R>
where
    R: AnnotationRepository,
    ExportError: From<R::Error>,
{
    /// Create an exporter over any repository
    pub fn new(
        repository: R,
        catalog: MetricCatalog,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, ExportError> {
        let export_dir = export_dir.into();
        std::fs::create_dir_all(&export_dir)?;
        Ok(Self {
            repository,
            catalog,
            export_dir,
        })
    }

    /// Directory outputs are written to
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn records(&self) -> Result<Vec<MetricAnnotationFile>, ExportError> {
        Ok(self.repository.records()?)
    }

    fn write_csv<const N: usize>(
        &self,
        file_name: &str,
        header: [&str; N],
        rows: impl IntoIterator<Item = [String; N]>,
    ) -> Result<PathBuf, ExportError> {
        let path = self.export_dir.join(file_name);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(header)?;
        let mut count = 0usize;
        for row in rows {
            writer.write_record(&row)?;
            count += 1;
        }
        writer.flush()?;
        info!("Wrote {} rows to {}", count, path.display());
        Ok(path)
    }

    fn write_json<T: Serialize>(&self, value: &T) -> Result<PathBuf, ExportError> {
        let path = self.export_dir.join("metadata.json");
        std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Write `tsmc_5.csv`: one row per (annotation, bbox)
    pub fn export_bbox_rows(&self, uid: &str, cid: &str) -> Result<PathBuf, ExportError> {
        let rows: Vec<[String; 12]> = self
            .records()?
            .iter()
            .flat_map(|record| bbox_rows(record, &self.catalog, uid, cid))
            .collect();
        self.write_csv("tsmc_5.csv", BBOX_HEADER, rows)
    }

    /// Write `full_report_agg.csv`: annotated pages and confirmation per metric
    pub fn export_full_report_agg(&self) -> Result<PathBuf, ExportError> {
        let rows: Vec<[String; 4]> = self
            .records()?
            .iter()
            .map(|record| MetricSummary::from_record(record).to_row())
            .collect();
        self.write_csv("full_report_agg.csv", AGG_HEADER, rows)
    }

    /// Write `single_page_pairs.csv`: one row per (metric, annotated page)
    pub fn export_single_page_pairs(&self) -> Result<PathBuf, ExportError> {
        let rows: Vec<[String; 5]> = self
            .records()?
            .iter()
            .flat_map(page_pairs)
            .map(|pair| pair.to_row())
            .collect();
        self.write_csv("single_page_pairs.csv", PAIRS_HEADER, rows)
    }

    /// Write `metadata.json` with the SHA-256 of the source PDF
    pub fn export_metadata<P: AsRef<Path>>(
        &self,
        company: &str,
        pdf_path: P,
        year: i32,
        lang: &str,
        sasb_version: &str,
    ) -> Result<PathBuf, ExportError> {
        let meta = ExportMetadata {
            company: company.to_string(),
            pdf_hash: pdf_sha256(pdf_path)?,
            year,
            lang: lang.to_string(),
            sasb_version: sasb_version.to_string(),
        };
        self.write_json(&meta)
    }

    /// Write the session variant of `metadata.json`, with export time and
    /// annotation count instead of a PDF hash
    pub fn export_session_metadata(
        &self,
        company: &str,
        year: i32,
        lang: &str,
        sasb_version: &str,
    ) -> Result<PathBuf, ExportError> {
        let total_annotations = self
            .records()?
            .iter()
            .map(|record| record.annotations.len())
            .sum();
        let export_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        let meta = SessionMetadata {
            company: company.to_string(),
            year,
            lang: lang.to_string(),
            sasb_version: sasb_version.to_string(),
            export_time,
            total_annotations,
        };
        self.write_json(&meta)
    }

    /// Run all four exports
    ///
    /// The PDF is hashed first, so a missing PDF fails before any table is
    /// written.
    pub fn export_all(&self, options: &ExportOptions) -> Result<ExportSummary, ExportError> {
        let metadata = match &options.pdf_path {
            Some(pdf) => self.export_metadata(
                &options.company,
                pdf,
                options.year,
                &options.lang,
                &options.sasb_version,
            )?,
            None => self.export_session_metadata(
                &options.company,
                options.year,
                &options.lang,
                &options.sasb_version,
            )?,
        };

        let records = self.records()?;
        let summary = ExportSummary {
            bbox_rows: self.export_bbox_rows(&options.uid, &options.cid)?,
            full_report_agg: self.export_full_report_agg()?,
            single_page_pairs: self.export_single_page_pairs()?,
            metadata,
            metrics: records.len(),
            annotations: records.iter().map(|r| r.annotations.len()).sum(),
        };
        info!(
            "Exported {} annotations across {} metrics to {}",
            summary.annotations,
            summary.metrics,
            self.export_dir.display()
        );
        Ok(summary)
    }
}
