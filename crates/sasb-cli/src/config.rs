//! Configuration management for the CLI.

use crate::cli::LlmArgs;
use crate::error::{CliError, Result};
use sasb_miner::MinerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External extraction settings
    #[serde(default)]
    pub llm: MinerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".sasb").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config.llm.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Extraction settings with command-line and environment overrides applied.
    pub fn miner_config(&self, overrides: &LlmArgs) -> Result<MinerConfig> {
        if overrides.heuristic_only {
            return Ok(MinerConfig {
                request_timeout_secs: self.llm.request_timeout_secs,
                ..MinerConfig::default()
            });
        }

        let mut config = self.llm.clone();
        if let Some(url) = &overrides.llm_base_url {
            config.llm_base_url = Some(url.clone());
        }
        if let Some(key) = &overrides.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(model) = &overrides.llm_model {
            config.llm_model = Some(model.clone());
        }
        config.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
