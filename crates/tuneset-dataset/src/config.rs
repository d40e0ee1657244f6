//! Dataset and verification configuration
//!
//! Defaults reproduce the reference export format; every field can be
//! overridden from a config file (all fields `#[serde(default)]`).

use serde::{Deserialize, Serialize};

/// Default export file name
pub const DEFAULT_FILENAME: &str = "fine_tuning_dataset.jsonl";

/// Default export MIME type
pub const DEFAULT_MIME: &str = "application/jsonl; charset=utf-8";

/// Placeholder substituted with the section cluster in prompt templates
pub const CLUSTER_PLACEHOLDER: &str = "{cluster}";

/// Record building and export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Export file name
    pub filename: String,
    /// Export MIME type
    pub mime: String,
    /// Also emit the per-site split as `field_instance_weights`
    pub include_instance_weights: bool,
    /// Prompt templates
    pub prompts: PromptTemplates,
}

impl DatasetConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With export file name
    #[inline]
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// With per-instance weights in each record
    #[inline]
    #[must_use]
    pub fn with_instance_weights(mut self, enabled: bool) -> Self {
        self.include_instance_weights = enabled;
        self
    }

    /// With prompt templates
    #[inline]
    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = prompts;
        self
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            mime: DEFAULT_MIME.to_string(),
            include_instance_weights: false,
            prompts: PromptTemplates::default(),
        }
    }
}

/// Prompt templates with a `{cluster}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    /// Narrative prompt
    pub narrative: String,
    /// Recommendations prompt
    pub recommendations: String,
}

impl PromptTemplates {
    /// Narrative prompt for a cluster
    #[must_use]
    pub fn narrative_for(&self, cluster: &str) -> String {
        self.narrative.replace(CLUSTER_PLACEHOLDER, cluster)
    }

    /// Recommendations prompt for a cluster
    #[must_use]
    pub fn recommendations_for(&self, cluster: &str) -> String {
        self.recommendations.replace(CLUSTER_PLACEHOLDER, cluster)
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            narrative: "Write a concise {cluster} assessment paragraph using the provided ODK context rows (survey, site, code, label, value).".to_string(),
            recommendations: "Propose 3–5 actionable programming recommendations for {cluster} using the ODK context rows. Return a bullet list.".to_string(),
        }
    }
}

/// A section whose narrative must reference a given field code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorField {
    /// Section id
    pub section_id: String,
    /// Field code expected in the narrative `source_field_codes`
    pub code: String,
}

impl AnchorField {
    /// Create anchor
    #[must_use]
    pub fn new(section_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            code: code.into(),
        }
    }
}

/// Self-verification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Exclusive lower bound for a record's weight sum
    pub weight_sum_min: f64,
    /// Inclusive upper bound for a record's weight sum
    pub weight_sum_max: f64,
    /// Narrative that must reference a known code
    pub anchor: Option<AnchorField>,
    /// Section that must not produce a recommendations record
    pub no_recs_section: Option<String>,
}

impl VerifyConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Without the section-specific checks
    #[must_use]
    pub fn structural_only() -> Self {
        Self {
            anchor: None,
            no_recs_section: None,
            ..Self::default()
        }
    }

    /// With anchor field
    #[inline]
    #[must_use]
    pub fn with_anchor(mut self, section_id: impl Into<String>, code: impl Into<String>) -> Self {
        self.anchor = Some(AnchorField::new(section_id, code));
        self
    }

    /// With section that must carry no recommendations
    #[inline]
    #[must_use]
    pub fn with_no_recs_section(mut self, section_id: impl Into<String>) -> Self {
        self.no_recs_section = Some(section_id.into());
        self
    }

    /// Whether a weight sum lies in `(min, max]`
    #[inline]
    #[must_use]
    pub fn weight_sum_in_band(&self, sum: f64) -> bool {
        sum > self.weight_sum_min && sum <= self.weight_sum_max
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            weight_sum_min: 0.95,
            weight_sum_max: 1.0001,
            anchor: Some(AnchorField::new("wash", "w_source_main")),
            no_recs_section: Some("overview".to_string()),
        }
    }
}
