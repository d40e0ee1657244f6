//! Provenance weight mapper
//!
//! Each listed code's base weight is notionally divided across the rows
//! (site deployments) carrying that code. Two views are published:
//!
//! - **per-instance**: `base / occurrences`, one share per row
//! - **aggregate**: `per_instance * occurrences`, which collapses back to the
//!   base weight and is what the exported `field_weights` carries
//!
//! A listed code with no matching rows divides by 1, so it keeps its base
//! weight in both views and the aggregate still sums to 1.

use crate::scheme::base_weights;
use indexmap::IndexMap;
use tuneset_model::ContextRow;

/// Number of rows carrying each code, in first-seen order
#[must_use]
pub fn occurrence_counts(rows: &[ContextRow]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for row in rows {
        *counts.entry(row.code.clone()).or_insert(0) += 1;
    }
    counts
}

/// Weight bookkeeping for one listed code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeWeight {
    /// Ramp weight from the field list
    pub base: f64,
    /// Rows carrying the code (may be 0)
    pub occurrences: usize,
}

impl CodeWeight {
    #[inline]
    fn divisor(&self) -> usize {
        self.occurrences.max(1)
    }

    /// Share of one row
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn per_instance(&self) -> f64 {
        self.base / self.divisor() as f64
    }

    /// Per-instance share multiplied back over all rows
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate(&self) -> f64 {
        self.per_instance() * self.divisor() as f64
    }
}

/// Field weights for one field list over one set of context rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldWeightMap {
    entries: IndexMap<String, CodeWeight>,
}

impl FieldWeightMap {
    /// Compute weights for `fields` (most salient first) over `rows`
    #[must_use]
    pub fn compute<S: AsRef<str>>(fields: &[S], rows: &[ContextRow]) -> Self {
        let counts = occurrence_counts(rows);
        let entries: IndexMap<String, CodeWeight> = base_weights(fields)
            .into_iter()
            .map(|(code, base)| {
                let occurrences = counts.get(&code).copied().unwrap_or(0);
                (code, CodeWeight { base, occurrences })
            })
            .collect();

        let map = Self { entries };
        let unmatched = map.unmatched_codes();
        if !unmatched.is_empty() {
            tracing::warn!(codes = ?unmatched, "listed field codes have no context rows");
        }
        map
    }

    /// Exported view: code → aggregate weight, in field-list order
    #[must_use]
    pub fn aggregate(&self) -> IndexMap<String, f64> {
        self.entries
            .iter()
            .map(|(code, w)| (code.clone(), w.aggregate()))
            .collect()
    }

    /// Per-row view: code → share of a single row carrying it
    #[must_use]
    pub fn per_instance(&self) -> IndexMap<String, f64> {
        self.entries
            .iter()
            .map(|(code, w)| (code.clone(), w.per_instance()))
            .collect()
    }

    /// Bookkeeping for one code, if listed
    #[inline]
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CodeWeight> {
        self.entries.get(code)
    }

    /// Rows carrying `code` (0 if unlisted or absent)
    #[inline]
    #[must_use]
    pub fn occurrences(&self, code: &str) -> usize {
        self.entries.get(code).map_or(0, |w| w.occurrences)
    }

    /// Listed codes that no row carries
    #[must_use]
    pub fn unmatched_codes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, w)| w.occurrences == 0)
            .map(|(code, _)| code.as_str())
            .collect()
    }

    /// Share attributed to a single row; 0 for codes not in the field list
    #[must_use]
    pub fn row_share(&self, row: &ContextRow) -> f64 {
        self.entries.get(&row.code).map_or(0.0, CodeWeight::per_instance)
    }

    /// [`Self::row_share`] for every row, in row order
    #[must_use]
    pub fn row_shares(&self, rows: &[ContextRow]) -> Vec<f64> {
        rows.iter().map(|row| self.row_share(row)).collect()
    }

    /// Sum of aggregate weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.values().map(CodeWeight::aggregate).sum()
    }

    /// Number of listed codes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the field list was empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate codes with their bookkeeping
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodeWeight)> {
        self.entries.iter().map(|(code, w)| (code.as_str(), w))
    }
}

/// Exported `field_weights` for a field list over a set of rows
#[must_use]
pub fn field_weights<S: AsRef<str>>(fields: &[S], rows: &[ContextRow]) -> IndexMap<String, f64> {
    FieldWeightMap::compute(fields, rows).aggregate()
}
