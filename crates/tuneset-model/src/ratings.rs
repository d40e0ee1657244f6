//! Per-dimension reviewer scores
//!
//! The overall rating is never stored: it is the mean of the three
//! dimensions rounded to one decimal, recomputed from [`RatingsDims`]
//! on every read.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Highest score a dimension accepts
pub const MAX_SCORE: u8 = 5;

/// Three independent 0..=5 scores
///
/// Deserialization goes through [`RatingsDims::new`], so out-of-range
/// scores in a sections file are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRatings")]
pub struct RatingsDims {
    /// How useful the content is for programming decisions
    pub helpfulness: u8,
    /// Whether the content is faithful to the context rows
    pub honesty: u8,
    /// Whether the content avoids harmful framing
    pub harmlessness: u8,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawRatings {
    helpfulness: u8,
    honesty: u8,
    harmlessness: u8,
}

impl TryFrom<RawRatings> for RatingsDims {
    type Error = ModelError;

    fn try_from(raw: RawRatings) -> Result<Self, Self::Error> {
        Self::new(raw.helpfulness, raw.honesty, raw.harmlessness)
    }
}

impl RatingsDims {
    /// Create from explicit scores
    ///
    /// # Errors
    /// Returns [`ModelError::RatingOutOfRange`] if any score exceeds [`MAX_SCORE`]
    pub fn new(helpfulness: u8, honesty: u8, harmlessness: u8) -> Result<Self, ModelError> {
        Self::default()
            .with(RatingDim::Helpfulness, helpfulness)?
            .with(RatingDim::Honesty, honesty)?
            .with(RatingDim::Harmlessness, harmlessness)
    }

    /// Copy with one dimension replaced
    ///
    /// # Errors
    /// Returns [`ModelError::RatingOutOfRange`] if `value` exceeds [`MAX_SCORE`]
    pub fn with(mut self, dim: RatingDim, value: u8) -> Result<Self, ModelError> {
        if value > MAX_SCORE {
            return Err(ModelError::RatingOutOfRange {
                value,
                max: MAX_SCORE,
            });
        }
        match dim {
            RatingDim::Helpfulness => self.helpfulness = value,
            RatingDim::Honesty => self.honesty = value,
            RatingDim::Harmlessness => self.harmlessness = value,
        }
        Ok(self)
    }

    /// Score for one dimension
    #[inline]
    #[must_use]
    pub const fn get(&self, dim: RatingDim) -> u8 {
        match dim {
            RatingDim::Helpfulness => self.helpfulness,
            RatingDim::Honesty => self.honesty,
            RatingDim::Harmlessness => self.harmlessness,
        }
    }

    /// Mean of the three scores, rounded to one decimal
    #[must_use]
    pub fn overall(&self) -> f64 {
        let sum = f64::from(self.helpfulness) + f64::from(self.honesty) + f64::from(self.harmlessness);
        (sum / 3.0 * 10.0).round() / 10.0
    }
}

/// Rating dimension selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingDim {
    /// Helpfulness score
    Helpfulness,
    /// Honesty score
    Honesty,
    /// Harmlessness score
    Harmlessness,
}

impl RatingDim {
    /// All dimensions in display order
    pub const ALL: [Self; 3] = [Self::Helpfulness, Self::Honesty, Self::Harmlessness];

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Helpfulness => "helpfulness",
            Self::Honesty => "honesty",
            Self::Harmlessness => "harmlessness",
        }
    }
}

impl Display for RatingDim {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingDim {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dim| dim.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownDimension(s.to_string()))
    }
}
