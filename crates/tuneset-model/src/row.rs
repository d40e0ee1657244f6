//! Context rows observed from survey deployments

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// One field observation from an external survey instrument
///
/// Rows sharing a `code` are the same logical field observed at different
/// sites; provenance weights are split across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRow {
    /// Survey (questionnaire) identifier
    pub survey: String,
    /// Deployment site, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Field code, reused across sites
    pub code: String,
    /// Human-readable field name
    pub label: String,
    /// Observed value
    pub value: ContextValue,
}

impl ContextRow {
    /// Create a row without a site
    #[must_use]
    pub fn new(
        survey: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<ContextValue>,
    ) -> Self {
        Self {
            survey: survey.into(),
            site: None,
            code: code.into(),
            label: label.into(),
            value: value.into(),
        }
    }

    /// With site
    #[inline]
    #[must_use]
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }
}

/// A context value keeps its JSON type: integers stay integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Numeric observation
    Number(serde_json::Number),
    /// Free-text observation
    Text(String),
}

impl Display for ContextValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}
