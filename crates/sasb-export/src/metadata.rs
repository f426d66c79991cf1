//! Export metadata records and the PDF fingerprint

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

/// `metadata.json` for a batch export against a known source PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Reporting company
    pub company: String,
    /// Lower-case hex SHA-256 of the source PDF bytes
    pub pdf_hash: String,
    /// Reporting year
    pub year: i32,
    /// Report language
    pub lang: String,
    /// Disclosure framework version tag
    pub sasb_version: String,
}

/// `metadata.json` written at the end of an annotation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Reporting company
    pub company: String,
    /// Reporting year
    pub year: i32,
    /// Report language
    pub lang: String,
    /// Disclosure framework version tag
    pub sasb_version: String,
    /// Seconds since the Unix epoch when the export ran
    pub export_time: f64,
    /// Annotations across every metric
    pub total_annotations: usize,
}

/// SHA-256 of a file's bytes as lower-case hex
pub fn pdf_sha256<P: AsRef<Path>>(path: P) -> Result<String, ExportError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ExportError::MissingPdf(path.to_path_buf()));
    }

    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
