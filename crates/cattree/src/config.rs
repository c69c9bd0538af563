//! Configuration management for cattree.
//!
//! Settings live in an optional YAML file (`cattree.yaml` by default).
//! Command-line flags override whatever the file provides.

use crate::error::{Error, Result};
use crate::inbreeding::{CalculatorConfig, DEFAULT_MAX_PATHS_PER_ANCESTOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cattree.yaml";

/// Generations fetched above a cat unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Configuration file structure for cattree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct CattreeConfig {
    /// Generations above the subject to load and walk
    pub max_depth: usize,

    /// Simple paths allowed from one parent to one common ancestor
    pub max_paths_per_ancestor: usize,
}

impl Default for CattreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_paths_per_ancestor: DEFAULT_MAX_PATHS_PER_ANCESTOR,
        }
    }
}

impl CattreeConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if given, otherwise from
    /// [`CONFIG_FILE_NAME`] in `dir` when it exists, otherwise defaults.
    pub async fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path).await;
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await? {
            tracing::debug!(path = %candidate.display(), "Loading configuration");
            return Self::load(&candidate).await;
        }

        Ok(Self::default())
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_paths_per_ancestor == 0 {
            return Err(Error::Config(
                "max-paths-per-ancestor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Calculator limits for a given depth.
    pub fn calculator(&self, max_depth: usize) -> CalculatorConfig {
        CalculatorConfig {
            max_depth: Some(max_depth),
            max_paths_per_ancestor: self.max_paths_per_ancestor,
        }
    }
}
