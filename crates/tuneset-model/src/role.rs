//! Session role

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Who is driving the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Subject-matter expert; may edit, accept and rate
    Reviewer,
    /// Read-only consumer of the report
    #[default]
    User,
}

impl Role {
    /// Whether this role may mutate section content or ratings
    #[inline]
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        match self {
            Self::Reviewer => true,
            Self::User => false,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reviewer => "reviewer",
            Self::User => "user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reviewer" => Ok(Self::Reviewer),
            "user" => Ok(Self::User),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}
