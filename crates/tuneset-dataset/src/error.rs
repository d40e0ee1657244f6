//! Error types for dataset construction and verification
//!
//! - [`DatasetError`]: assembling or writing the dataset
//! - [`VerifyError`]: the first self-verification check that failed

use std::path::PathBuf;

/// Errors during dataset assembly and export
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Record could not be serialized to a JSON line
    #[error("failed to serialize {kind} record for section '{section_id}': {source}")]
    Serialize {
        /// Section the record was built from
        section_id: String,
        /// Record kind
        kind: &'static str,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// IO error during export write
    #[error("io error writing {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Self-verification failures, one variant per check
///
/// Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Dataset could not be assembled at all
    #[error("dataset assembly failed: {0}")]
    Assembly(#[from] DatasetError),

    /// Total line count differs from sections + sections with recommendations
    #[error("Expected {expected} JSONL rows in total, found {actual}.")]
    LineCount {
        /// Expected line count
        expected: usize,
        /// Lines found
        actual: usize,
    },

    /// Line does not parse as JSON
    #[error("Line {line} is not valid JSON.")]
    InvalidJson {
        /// 1-based line number
        line: usize,
    },

    /// Record has no non-empty prompt string
    #[error("Missing prompt string (line {line}).")]
    MissingPrompt {
        /// 1-based line number
        line: usize,
    },

    /// Record has no questionnaire id
    #[error("Missing questionnaire_id (line {line}).")]
    MissingQuestionnaireId {
        /// 1-based line number
        line: usize,
    },

    /// Record has no object-typed field weights
    #[error("Missing field_weights map (line {line}).")]
    MissingFieldWeights {
        /// 1-based line number
        line: usize,
    },

    /// Field weights do not sum to ~1
    #[error("Field weights should sum to ~1 across referenced codes (line {line}, sum {sum}).")]
    WeightSumOutOfBand {
        /// 1-based line number
        line: usize,
        /// Sum of the weights
        sum: f64,
    },

    /// Recommendations completion is not a bullet list
    #[error("Recommendations completion should be a bullet list separated by newlines (line {line}).")]
    CompletionNotBulleted {
        /// 1-based line number
        line: usize,
    },

    /// Bullet count differs from final suggestion count
    #[error("Mismatch between suggestions and completion bullets (line {line}: {bullets} bullets, {suggestions} suggestions).")]
    BulletMismatch {
        /// 1-based line number
        line: usize,
        /// Bullet lines in the completion
        bullets: usize,
        /// Final suggestion count
        suggestions: usize,
    },

    /// Wrong number of recommendations records
    #[error("Incorrect number of recommendations rows: expected {expected}, found {actual}.")]
    RecommendationCount {
        /// Sections with recommendations
        expected: usize,
        /// Recommendations records found
        actual: usize,
    },

    /// Anchor section's narrative does not reference its anchor code
    #[error("'{section_id}' narrative should reference '{code}'.")]
    AnchorMissing {
        /// Anchor section id
        section_id: String,
        /// Code the narrative must reference
        code: String,
    },

    /// Section that must not carry recommendations produced a record
    #[error("'{section_id}' must not produce a recommendations row.")]
    UnexpectedRecommendations {
        /// Offending section id
        section_id: String,
    },

    /// Joining and re-splitting lines changed the row count
    #[error("JSONL join/split with \\n should preserve row count ({expected} rows, {actual} after split).")]
    LineSplit { expected: usize, actual: usize },
}

impl VerifyError {
    /// 1-based line the failure points at, if any
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidJson { line }
            | Self::MissingPrompt { line }
            | Self::MissingQuestionnaireId { line }
            | Self::MissingFieldWeights { line }
            | Self::WeightSumOutOfBand { line, .. }
            | Self::CompletionNotBulleted { line }
            | Self::BulletMismatch { line, .. } => Some(*line),
            Self::Assembly(_)
            | Self::LineCount { .. }
            | Self::RecommendationCount { .. }
            | Self::AnchorMissing { .. }
            | Self::UnexpectedRecommendations { .. }
            | Self::LineSplit { .. } => None,
        }
    }
}
