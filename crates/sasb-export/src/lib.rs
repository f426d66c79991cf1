//! SASB Exporter
//!
//! Flattens every stored metric record of a project into the CSV tables and
//! the JSON metadata record consumed downstream.
//!
//! # Outputs
//!
//! All files land in `<project>/exports/`:
//!
//! - `tsmc_5.csv`: one row per (annotation, bbox)
//! - `full_report_agg.csv`: annotated pages and confirmation state per metric
//! - `single_page_pairs.csv`: confirmation state per (metric, page)
//! - `metadata.json`: company, year, language, framework version, plus either
//!   the source PDF hash or the session export time and annotation count
//!
//! Booleans are written as `true` / `false`. Metrics missing from
//! `metric_sid_map.json` get topic and sid `0`. A malformed annotation file
//! fails the export.
//!
//! # Examples
//!
//! ```no_run
//! use sasb_export::{ExportOptions, Exporter};
//!
//! let exporter = Exporter::open("new_project").unwrap();
//! let summary = exporter.export_all(&ExportOptions::default()).unwrap();
//! println!("wrote {}", summary.bbox_rows.display());
//! ```

#![warn(missing_docs)]

mod error;
mod exporter;
mod metadata;
mod tables;

pub use error::ExportError;
pub use exporter::{ExportOptions, ExportSummary, Exporter, EXPORTS_DIR, METRIC_MAP_FILE};
pub use metadata::{pdf_sha256, ExportMetadata, SessionMetadata};
pub use tables::{bbox_rows, page_pairs, MetricSummary, PagePair};
