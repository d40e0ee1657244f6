//! Dataset assembly
//!
//! Walks sections in order: each contributes its narrative line, then its
//! recommendations line when it has recommendations.

use crate::builders::{build_narrative_record, build_recommendations_record};
use crate::config::DatasetConfig;
use crate::digest::DatasetDigest;
use crate::error::DatasetError;
use crate::record::DatasetRecord;
use tuneset_model::Section;

/// Build all records in export order
#[must_use]
pub fn build_records<'a>(sections: &'a [Section], config: &DatasetConfig) -> Vec<DatasetRecord<'a>> {
    let mut records = Vec::with_capacity(sections.len() * 2);
    for section in sections {
        records.push(DatasetRecord::Narrative(build_narrative_record(section, config)));
        if let Some(recs) = build_recommendations_record(section, config) {
            records.push(DatasetRecord::Recommendations(recs));
        }
    }
    records
}

/// Serialize records to one compact JSON string each
///
/// # Errors
/// Returns [`DatasetError::Serialize`] naming the offending record
pub fn serialize_records(records: &[DatasetRecord<'_>]) -> Result<Vec<String>, DatasetError> {
    records
        .iter()
        .map(|record| {
            serde_json::to_string(record).map_err(|source| DatasetError::Serialize {
                section_id: record.section_id().to_string(),
                kind: record.kind(),
                source,
            })
        })
        .collect()
}

/// JSONL lines for `sections` under the default configuration
///
/// # Errors
/// Returns error if a record fails to serialize
pub fn build_jsonl_lines(sections: &[Section]) -> Result<Vec<String>, DatasetError> {
    Ok(Dataset::assemble(sections, &DatasetConfig::default())?.lines)
}

/// An assembled dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// One JSON object per line, no trailing newline
    pub lines: Vec<String>,
    /// Narrative records
    pub narrative_count: usize,
    /// Recommendations records
    pub recommendations_count: usize,
}

impl Dataset {
    /// Assemble the dataset for `sections`
    ///
    /// # Errors
    /// Returns error if a record fails to serialize
    pub fn assemble(sections: &[Section], config: &DatasetConfig) -> Result<Self, DatasetError> {
        let records = build_records(sections, config);
        let recommendations_count = records
            .iter()
            .filter(|r| matches!(r, DatasetRecord::Recommendations(_)))
            .count();
        let narrative_count = records.len() - recommendations_count;
        let lines = serialize_records(&records)?;

        tracing::info!(
            sections = sections.len(),
            narrative = narrative_count,
            recommendations = recommendations_count,
            "assembled dataset"
        );

        Ok(Self {
            lines,
            narrative_count,
            recommendations_count,
        })
    }

    /// Total line count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined by `\n`, no trailing newline
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        self.lines.join("\n")
    }

    /// Digest of [`Self::to_jsonl`]
    #[must_use]
    pub fn digest(&self) -> DatasetDigest {
        DatasetDigest::of_lines(&self.lines)
    }
}
