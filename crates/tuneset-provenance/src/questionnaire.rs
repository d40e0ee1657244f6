//! Questionnaire identifier resolution

use indexmap::IndexMap;
use tuneset_model::ContextRow;

/// Rows per survey, in first-seen order
#[must_use]
pub fn survey_counts(rows: &[ContextRow]) -> IndexMap<&str, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for row in rows {
        *counts.entry(row.survey.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Most frequent survey among `rows`
///
/// Ties go to the survey seen first. No rows → empty string.
#[must_use]
pub fn resolve_questionnaire_id(rows: &[ContextRow]) -> String {
    survey_counts(rows)
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (survey, n)| match best {
            Some((_, top)) if top >= n => best,
            _ => Some((survey, n)),
        })
        .map(|(survey, _)| survey.to_string())
        .unwrap_or_default()
}
