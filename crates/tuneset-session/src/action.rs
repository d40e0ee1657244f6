//! Session actions and the pure section reducers behind them

use serde::{Deserialize, Serialize};
use tuneset_model::{ModelError, RatingDim, Role, Section};

/// Partial update of a section's reviewer-owned content
///
/// `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    /// Reviewer revision of the narrative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_text: Option<String>,
    /// Reviewer suggestion list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_recs: Option<Vec<String>>,
    /// Narrative acceptance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    /// Suggestion acceptance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_recs: Option<bool>,
}

impl SectionPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With narrative revision
    #[inline]
    #[must_use]
    pub fn with_human_text(mut self, text: impl Into<String>) -> Self {
        self.human_text = Some(text.into());
        self
    }

    /// With suggestion list
    #[must_use]
    pub fn with_human_recs<I, S>(mut self, recs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.human_recs = Some(recs.into_iter().map(Into::into).collect());
        self
    }

    /// With narrative acceptance
    #[inline]
    #[must_use]
    pub fn with_accepted(mut self, accepted: bool) -> Self {
        self.accepted = Some(accepted);
        self
    }

    /// With suggestion acceptance
    #[inline]
    #[must_use]
    pub fn with_accept_recs(mut self, accept: bool) -> Self {
        self.accept_recs = Some(accept);
        self
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.human_text.is_none()
            && self.human_recs.is_none()
            && self.accepted.is_none()
            && self.accept_recs.is_none()
    }
}

/// A state transition requested by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Apply a patch to one section
    UpdateSection { id: String, patch: SectionPatch },
    /// Set one rating dimension
    SetRatingDim { id: String, dim: RatingDim, value: u8 },
    /// Make a section active
    SelectSection { id: String },
    /// Switch role
    SetRole { role: Role },
}

impl Action {
    /// Section the action targets, if any
    #[must_use]
    pub fn section_id(&self) -> Option<&str> {
        match self {
            Self::UpdateSection { id, .. } | Self::SetRatingDim { id, .. } | Self::SelectSection { id } => {
                Some(id)
            }
            Self::SetRole { .. } => None,
        }
    }

    /// Whether the action mutates section content
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        match self {
            Self::UpdateSection { .. } | Self::SetRatingDim { .. } => true,
            Self::SelectSection { .. } | Self::SetRole { .. } => false,
        }
    }
}

/// New section with `patch` applied; the input is left untouched
#[must_use]
pub fn apply_patch(section: &Section, patch: &SectionPatch) -> Section {
    let mut next = section.clone();
    if let Some(text) = &patch.human_text {
        next.human_text.clone_from(text);
    }
    if let Some(recs) = &patch.human_recs {
        next.human_recs.clone_from(recs);
    }
    if let Some(accepted) = patch.accepted {
        next.accepted = accepted;
    }
    if let Some(accept) = patch.accept_recs {
        next.accept_recs = accept;
    }
    next
}

/// New section with one rating dimension replaced
///
/// # Errors
/// Returns [`ModelError::RatingOutOfRange`] for scores above the maximum
pub fn apply_rating(section: &Section, dim: RatingDim, value: u8) -> Result<Section, ModelError> {
    let ratings = section.ratings.with(dim, value)?;
    let mut next = section.clone();
    next.ratings = ratings;
    Ok(next)
}
