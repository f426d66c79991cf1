//! Error types for the exporter

use sasb_domain::CatalogError;
use sasb_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting
#[derive(Error, Debug)]
pub enum ExportError {
    /// `metric_sid_map.json` is required for topic/sid lookups
    #[error("Metric map not found: {0}")]
    MissingMetricMap(PathBuf),

    /// The source PDF to fingerprint does not exist
    #[error("PDF not found: {0}")]
    MissingPdf(PathBuf),

    /// The metric map could not be parsed
    #[error("Metric map error: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading annotations failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Writing CSV output failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
