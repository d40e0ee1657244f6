//! Export record shapes
//!
//! Records borrow from the section they were built from and are only ever
//! serialized. Field order is the export column order.

use indexmap::IndexMap;
use serde::Serialize;
use tuneset_model::{ContextRow, RatingsDims};

/// Narrative record, one per section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRecord<'a> {
    /// Source section id
    pub section_id: &'a str,
    /// Section title
    pub title: &'a str,
    /// Humanitarian cluster
    pub cluster: &'a str,
    /// Most frequent survey among the context rows
    pub questionnaire_id: String,
    /// Field codes the text was drawn from, in salience order
    pub source_field_codes: &'a [String],
    /// Aggregate weight per field code
    pub field_weights: IndexMap<String, f64>,
    /// Per-row weight shares, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_instance_weights: Option<IndexMap<String, f64>>,
    /// Model-drafted narrative
    pub ai_text: &'a str,
    /// Reviewer-edited narrative
    pub human_text: &'a str,
    /// `None` until the section has been rated
    pub rating: Option<f64>,
    /// Per-dimension reviewer scores
    pub rating_dimensions: RatingsDims,
    /// Whether the reviewer accepted the edited narrative
    pub accepted: bool,
    /// Narrative chosen for training
    pub final_text: &'a str,
    /// Evidence rows shown to the reviewer
    pub context_rows: &'a [ContextRow],
    /// Rendered prompt template
    pub prompt: String,
    /// Same as `final_text`
    pub completion: &'a str,
}

/// Recommendations record, one per section with recommendations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationsRecord<'a> {
    /// Source section id
    pub section_id: &'a str,
    /// Section title
    pub title: &'a str,
    /// Humanitarian cluster
    pub cluster: &'a str,
    /// Most frequent survey among the context rows
    pub questionnaire_id: String,
    /// Field codes the text was drawn from, in salience order
    pub source_field_codes: &'a [String],
    /// Aggregate weight per field code
    pub field_weights: IndexMap<String, f64>,
    /// Per-row weight shares, when enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_instance_weights: Option<IndexMap<String, f64>>,
    /// Model-drafted suggestions
    pub ai_suggestions: &'a [String],
    /// Reviewer-edited suggestions
    pub human_suggestions: &'a [String],
    /// The section's `accept_recs` flag
    pub accepted: bool,
    /// Suggestions chosen for training
    pub final_suggestions: &'a [String],
    /// Evidence rows shown to the reviewer
    pub context_rows: &'a [ContextRow],
    /// Rendered prompt template
    pub prompt: String,
    /// Markdown bullet list of `final_suggestions`
    pub completion: String,
}

/// Either record, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatasetRecord<'a> {
    /// `"type": "narrative"`
    Narrative(NarrativeRecord<'a>),
    /// `"type": "recommendations"`
    Recommendations(RecommendationsRecord<'a>),
}

impl DatasetRecord<'_> {
    /// Value of the `type` tag
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Narrative(_) => "narrative",
            Self::Recommendations(_) => "recommendations",
        }
    }

    /// Section the record was built from
    #[must_use]
    pub fn section_id(&self) -> &str {
        match self {
            Self::Narrative(r) => r.section_id,
            Self::Recommendations(r) => r.section_id,
        }
    }

    /// Prompt text
    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Self::Narrative(r) => &r.prompt,
            Self::Recommendations(r) => &r.prompt,
        }
    }

    /// Completion text
    #[must_use]
    pub fn completion(&self) -> &str {
        match self {
            Self::Narrative(r) => r.completion,
            Self::Recommendations(r) => &r.completion,
        }
    }
}
