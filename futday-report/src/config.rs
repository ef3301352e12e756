//! Report configuration.
//!
//! Credentials and endpoints are plain fields loaded from a TOML file and
//! handed to the orchestrator at construction. The core computations take
//! no configuration at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use futday_core::narrative::deepseek::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use futday_core::news::MAX_AGGREGATED;
use futday_core::session::DEFAULT_LOOKBACK_DAYS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// DeepSeek credentials and model selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeepSeekConfig {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
}

/// Serper search credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerperConfig {
    pub api_key: String,
}

/// Full report configuration. Optional sections switch collaborators off:
/// no `[deepseek]` → mechanical narrative, no `[serper]` → no search-backed
/// news or intel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepseek: Option<DeepSeekConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serper: Option<SerperConfig>,

    /// Cap on the backward trading-day search.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Aggregated news pool size.
    #[serde(default = "default_max_aggregated")]
    pub max_aggregated_news: usize,

    /// News items rendered into the document.
    #[serde(default = "default_max_rendered")]
    pub max_rendered_news: usize,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_max_aggregated() -> usize {
    MAX_AGGREGATED
}

fn default_max_rendered() -> usize {
    8
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            deepseek: None,
            serper: None,
            lookback_days: default_lookback_days(),
            max_aggregated_news: default_max_aggregated(),
            max_rendered_news: default_max_rendered(),
            output_dir: default_output_dir(),
        }
    }
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
