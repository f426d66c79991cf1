//! SASB Annotation Store
//!
//! Implements the `AnnotationRepository` trait with one pretty-printed JSON
//! file per metric under `<project>/annotations/`.
//!
//! # Layout
//!
//! - `annotations/<safe_metric_id>.json` holds a `MetricAnnotationFile`
//! - `annotations/<safe_metric_id>.json.<unix_seconds>.bak` holds the content
//!   a save replaced
//!
//! Every save renames the existing file to a backup before writing, so each
//! write preserves exactly one snapshot of what it replaced. Two saves within
//! the same second share a backup name and the later one wins.
//!
//! # Concurrency
//!
//! There is no locking. Callers must ensure a single writer per metric;
//! concurrent `add_annotation` calls on one metric can lose updates.
//!
//! # Examples
//!
//! ```no_run
//! use sasb_domain::traits::AnnotationRepository;
//! use sasb_domain::Annotation;
//! use sasb_store::AnnotationStore;
//!
//! let store = AnnotationStore::open("new_project").unwrap();
//! store.add_annotation("TC-SC-110a.1", Annotation::new(12, "1,234", "tCO2e")).unwrap();
//! let record = store.load("TC-SC-110a.1").unwrap();
//! assert_eq!(record.annotations.len(), 1);
//! ```

#![warn(missing_docs)]

use sasb_domain::traits::AnnotationRepository;
use sasb_domain::{Annotation, MetricAnnotationFile};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};

/// Directory under the project holding metric files
pub const ANNOTATIONS_DIR: &str = "annotations";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored file could not be parsed
    #[error("Malformed annotation file {path}: {source}")]
    Malformed {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Metric id cannot be mapped to a file name
    #[error("Invalid metric id '{0}'")]
    InvalidMetricId(String),

    /// A stored file belongs to a different metric id
    #[error("File for '{expected}' holds metric '{found}'")]
    MetricIdMismatch {
        /// Metric id that was requested
        expected: String,
        /// Metric id found in the file
        found: String,
    },

    /// Annotation failed validation
    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),
}

/// Map a metric id to its file stem by replacing every `/` with `_`
///
/// Ids that are empty, `.` or `..`, or contain `\` or NUL are rejected.
///
/// # Examples
///
/// ```
/// use sasb_store::safe_metric_id;
///
/// assert_eq!(safe_metric_id("TC-SC/110a.1").unwrap(), "TC-SC_110a.1");
/// assert!(safe_metric_id("..").is_err());
/// ```
pub fn safe_metric_id(metric_id: &str) -> Result<String, StoreError> {
    if metric_id.is_empty()
        || metric_id == "."
        || metric_id == ".."
        || metric_id.contains(['\\', '\0'])
    {
        return Err(StoreError::InvalidMetricId(metric_id.to_string()));
    }
    Ok(metric_id.replace('/', "_"))
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// File-backed annotation store for one project
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    dir: PathBuf,
}

impl AnnotationStore {
    /// Open the store of a project directory, creating `annotations/` if needed
    pub fn open<P: AsRef<Path>>(project_dir: P) -> Result<Self, StoreError> {
        let dir = project_dir.as_ref().join(ANNOTATIONS_DIR);
        std::fs::create_dir_all(&dir)?;
        debug!("Opened annotation store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the metric files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `metric_id`
    pub fn path(&self, metric_id: &str) -> Result<PathBuf, StoreError> {
        Ok(self.dir.join(format!("{}.json", safe_metric_id(metric_id)?)))
    }

    /// Ids of every stored metric, in file name order
    pub fn metric_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .records()?
            .into_iter()
            .map(|record| record.metric_id)
            .collect())
    }

    /// Backup files for `metric_id`, sorted by name
    pub fn backups(&self, metric_id: &str) -> Result<Vec<PathBuf>, StoreError> {
        let prefix = format!("{}.json.", safe_metric_id(metric_id)?);
        let mut backups: Vec<PathBuf> = self
            .entries()?
            .into_iter()
            .filter(|(name, _)| name.starts_with(&prefix) && name.ends_with(".bak"))
            .map(|(_, path)| path)
            .collect();
        backups.sort();
        Ok(backups)
    }

    /// Regular files in the store directory with UTF-8 names, sorted by name
    fn entries(&self) -> Result<Vec<(String, PathBuf)>, StoreError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                entries.push((name, entry.path()));
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn read_file(path: &Path) -> Result<MetricAnnotationFile, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(format!(".{}.bak", unix_seconds()));
        PathBuf::from(name)
    }
}

impl AnnotationRepository for AnnotationStore {
    type Error = StoreError;

    fn load(&self, metric_id: &str) -> Result<MetricAnnotationFile, Self::Error> {
        let path = self.path(metric_id)?;
        if !path.exists() {
            return Ok(MetricAnnotationFile::new(metric_id));
        }

        let record = Self::read_file(&path)?;
        if record.metric_id != metric_id {
            return Err(StoreError::MetricIdMismatch {
                expected: metric_id.to_string(),
                found: record.metric_id,
            });
        }
        Ok(record)
    }

    fn save(&self, record: &MetricAnnotationFile) -> Result<(), Self::Error> {
        let path = self.path(&record.metric_id)?;
        let json = serde_json::to_string_pretty(record)?;

        if path.exists() {
            let backup = Self::backup_path(&path);
            std::fs::rename(&path, &backup)?;
            debug!("Backed up {} to {}", path.display(), backup.display());
        }
        std::fs::write(&path, json)?;

        info!(
            "Saved {} annotations for {}",
            record.annotations.len(),
            record.metric_id
        );
        Ok(())
    }

    fn add_annotation(&self, metric_id: &str, annotation: Annotation) -> Result<(), Self::Error> {
        annotation.validate().map_err(StoreError::InvalidAnnotation)?;

        let mut record = self.load(metric_id)?;
        record.annotations.push(annotation);
        self.save(&record)
    }

    fn records(&self) -> Result<Vec<MetricAnnotationFile>, Self::Error> {
        self.entries()?
            .into_iter()
            .filter(|(name, _)| name.ends_with(".json"))
            .map(|(_, path)| Self::read_file(&path))
            .collect()
    }
}
