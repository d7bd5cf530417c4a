//! Analysis configuration
//!
//! Loaded from YAML; every field is optional and falls back to its default.
//!
//! ```yaml
//! overlap_storage: sparse
//! trace_frontiers: true
//! log_level: debug
//! ```

use friendgraph_algorithms::OverlapStorage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Knobs shared by the CLI and embedding applications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dense matrix or sparse pair map for mutual-friend counts
    pub overlap_storage: OverlapStorage,
    /// Log every BFS frontier through `TracingObserver`
    pub trace_frontiers: bool,
    /// tracing level filter (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            overlap_storage: OverlapStorage::Dense,
            trace_frontiers: false,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
