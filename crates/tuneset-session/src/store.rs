//! Session store
//!
//! Owns the section list, the active section and the current role. All
//! mutation goes through [`SessionStore::dispatch`], which replaces the
//! target section whole.

use crate::action::{apply_patch, apply_rating, Action};
use crate::error::SessionError;
use tuneset_model::{demo, Role, Section};

/// In-memory review session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore {
    sections: Vec<Section>,
    active: Option<String>,
    role: Role,
}

impl SessionStore {
    /// Create a store over `sections`; the first section is active
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        let active = sections.first().map(|s| s.id.clone());
        Self {
            sections,
            active,
            role: Role::default(),
        }
    }

    /// Store seeded with the demo sections
    #[must_use]
    pub fn from_demo() -> Self {
        Self::new(demo::initial_sections())
    }

    /// With initial role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sections in display order
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Consume the store, returning its sections
    #[inline]
    #[must_use]
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Section by id
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Currently active section
    #[must_use]
    pub fn active_section(&self) -> Option<&Section> {
        self.active.as_deref().and_then(|id| self.section(id))
    }

    /// Current role
    #[inline]
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the store holds no sections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections the reviewer has touched
    #[must_use]
    pub fn reviewed_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_reviewed()).count()
    }

    /// Reviewed share as a rounded percentage; 0 for an empty store
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn reviewed_pct(&self) -> u8 {
        if self.sections.is_empty() {
            return 0;
        }
        let pct = self.reviewed_count() as f64 / self.sections.len() as f64 * 100.0;
        pct.round() as u8
    }

    /// Apply an action
    ///
    /// # Errors
    /// - [`SessionError::UnknownSection`] if the target id is not present
    /// - [`SessionError::ReadOnly`] for edits outside the reviewer role
    /// - [`SessionError::Rating`] for out-of-range scores
    pub fn dispatch(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::UpdateSection { id, patch } => {
                let index = self.editable(&id)?;
                self.sections[index] = apply_patch(&self.sections[index], &patch);
                tracing::debug!(section = %id, "section updated");
            }
            Action::SetRatingDim { id, dim, value } => {
                let index = self.editable(&id)?;
                self.sections[index] = apply_rating(&self.sections[index], dim, value)?;
                tracing::debug!(section = %id, %dim, value, "rating set");
            }
            Action::SelectSection { id } => {
                self.index_of(&id)?;
                self.active = Some(id);
            }
            Action::SetRole { role } => {
                tracing::debug!(%role, "role changed");
                self.role = role;
            }
        }
        Ok(())
    }

    /// Apply actions in order, stopping at the first failure
    ///
    /// # Errors
    /// Returns the failing action's error; earlier actions stay applied
    pub fn dispatch_all<I>(&mut self, actions: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = Action>,
    {
        let mut applied = 0;
        for action in actions {
            self.dispatch(action)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn index_of(&self, id: &str) -> Result<usize, SessionError> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SessionError::unknown(id))
    }

    fn editable(&self, id: &str) -> Result<usize, SessionError> {
        let index = self.index_of(id)?;
        if !self.role.can_edit() {
            return Err(SessionError::ReadOnly {
                role: self.role,
                section_id: id.to_string(),
            });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::SectionPatch;
    use tuneset_model::RatingDim;

    fn reviewer() -> SessionStore {
        SessionStore::from_demo().with_role(Role::Reviewer)
    }

    #[test]
    fn first_section_starts_active() {
        let store = SessionStore::from_demo();
        assert_eq!(store.active_section().map(|s| s.id.as_str()), Some("overview"));
        assert_eq!(store.role(), Role::User);
        assert_eq!(store.reviewed_count(), 0);
        assert_eq!(store.reviewed_pct(), 0);
    }

    #[test]
    fn user_cannot_edit() {
        let mut store = SessionStore::from_demo();
        let err = store
            .dispatch(Action::UpdateSection {
                id: "wash".to_string(),
                patch: SectionPatch::new().with_accepted(true),
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::ReadOnly { role: Role::User, .. }));
        assert!(!store.section("wash").unwrap().accepted);
    }

    #[test]
    fn unknown_section_rejected_before_role() {
        let mut store = SessionStore::from_demo();
        let err = store
            .dispatch(Action::SetRatingDim {
                id: "nope".to_string(),
                dim: RatingDim::Honesty,
                value: 3,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownSection("nope".to_string()));
    }

    #[test]
    fn reviewer_rating_counts_as_reviewed() {
        let mut store = reviewer();
        store
            .dispatch(Action::SetRatingDim {
                id: "health".to_string(),
                dim: RatingDim::Helpfulness,
                value: 5,
            })
            .unwrap();
        assert_eq!(store.reviewed_count(), 1);
        // 1 of 6
        assert_eq!(store.reviewed_pct(), 17);
    }

    #[test]
    fn select_requires_known_id() {
        let mut store = SessionStore::from_demo();
        store.dispatch(Action::SelectSection { id: "food".to_string() }).unwrap();
        assert_eq!(store.active_section().unwrap().id, "food");
        assert!(store.dispatch(Action::SelectSection { id: "x".to_string() }).is_err());
        assert_eq!(store.active_section().unwrap().id, "food");
    }

    #[test]
    fn empty_store_has_no_active_section() {
        let store = SessionStore::new(Vec::new());
        assert!(store.is_empty());
        assert!(store.active_section().is_none());
        assert_eq!(store.reviewed_pct(), 0);
    }

    #[test]
    fn dispatch_all_stops_at_failure() {
        let mut store = SessionStore::from_demo();
        let result = store.dispatch_all([
            Action::SetRole { role: Role::Reviewer },
            Action::UpdateSection {
                id: "wash".to_string(),
                patch: SectionPatch::new().with_accepted(true),
            },
            Action::SetRole { role: Role::User },
            Action::UpdateSection {
                id: "food".to_string(),
                patch: SectionPatch::new().with_accepted(true),
            },
        ]);
        assert!(result.is_err());
        assert!(store.section("wash").unwrap().accepted);
        assert!(!store.section("food").unwrap().accepted);
    }
}
