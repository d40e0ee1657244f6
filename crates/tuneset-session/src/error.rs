//! Session error types

use tuneset_model::{ModelError, Role};

/// Errors raised when an action cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No section with this id
    #[error("unknown section: '{0}'")]
    UnknownSection(String),

    /// Current role may not edit
    #[error("role '{role}' cannot edit section '{section_id}'")]
    ReadOnly { role: Role, section_id: String },

    /// Rating value rejected by the model
    #[error(transparent)]
    Rating(#[from] ModelError),
}

impl SessionError {
    /// Create unknown-section error
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownSection(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_names_role_and_section() {
        let err = SessionError::ReadOnly {
            role: Role::User,
            section_id: "wash".to_string(),
        };
        assert_eq!(err.to_string(), "role 'user' cannot edit section 'wash'");
    }

    #[test]
    fn rating_error_is_transparent() {
        let err: SessionError = ModelError::RatingOutOfRange { value: 9, max: 5 }.into();
        assert_eq!(err.to_string(), "rating out of range: 9 (max 5)");
    }
}
