//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Annotation store error
    #[error("Store error: {0}")]
    Store(#[from] sasb_store::StoreError),

    /// Export error
    #[error("Export error: {0}")]
    Export(#[from] sasb_export::ExportError),

    /// Error loading mining inputs
    #[error("Mining input error: {0}")]
    Miner(#[from] sasb_miner::MinerError),

    /// Metric map error
    #[error("Metric map error: {0}")]
    Catalog(#[from] sasb_domain::CatalogError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
