//! Error types for the miner

use thiserror::Error;

/// Errors that can occur while loading mining inputs or reading provider output
///
/// The mining operations themselves never return these; they degrade to
/// fewer candidates instead.
#[derive(Error, Debug)]
pub enum MinerError {
    /// Provider response does not match the candidate schema
    #[error("Invalid candidate format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for MinerError {
    fn from(e: serde_json::Error) -> Self {
        MinerError::JsonParse(e.to_string())
    }
}
