//! Application configuration
//!
//! ```toml
//! [export]
//! filename = "fine_tuning_dataset.jsonl"
//! include_instance_weights = false
//!
//! [verify]
//! weight_sum_min = 0.95
//! no_recs_section = "overview"
//!
//! [verify.anchor]
//! section_id = "wash"
//! code = "w_source_main"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tuneset_dataset::{DatasetConfig, VerifyConfig};

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Record building and export
    pub export: DatasetConfig,
    /// Self-verification
    pub verify: VerifyConfig,
}

impl AppConfig {
    /// Parse TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid configuration TOML
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load from `path`, or defaults when absent
    ///
    /// # Errors
    /// Returns error if a given file cannot be loaded
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// With export configuration
    #[inline]
    #[must_use]
    pub fn with_export(mut self, export: DatasetConfig) -> Self {
        self.export = export;
        self
    }

    /// With verification configuration
    #[inline]
    #[must_use]
    pub fn with_verify(mut self, verify: VerifyConfig) -> Self {
        self.verify = verify;
        self
    }
}
