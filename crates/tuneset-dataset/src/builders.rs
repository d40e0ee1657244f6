//! Record builders
//!
//! Pure functions of section state: same section and config in, same
//! record out.

use crate::config::DatasetConfig;
use crate::record::{NarrativeRecord, RecommendationsRecord};
use tuneset_model::Section;
use tuneset_provenance::{resolve_questionnaire_id, FieldWeightMap};

/// Render suggestions as a markdown bullet list, one per line
///
/// An empty list renders as the empty string.
#[must_use]
pub fn bullet_completion<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the narrative record for a section
#[must_use]
pub fn build_narrative_record<'a>(section: &'a Section, config: &DatasetConfig) -> NarrativeRecord<'a> {
    let weights = FieldWeightMap::compute(&section.narrative_fields, &section.context_rows);
    let final_text = section.final_narrative();
    let rating = section.rating();

    tracing::debug!(section = %section.id, accepted = section.accepted, "built narrative record");

    NarrativeRecord {
        section_id: &section.id,
        title: &section.title,
        cluster: &section.cluster,
        questionnaire_id: resolve_questionnaire_id(&section.context_rows),
        source_field_codes: &section.narrative_fields,
        field_weights: weights.aggregate(),
        field_instance_weights: config.include_instance_weights.then(|| weights.per_instance()),
        ai_text: &section.ai_text,
        human_text: &section.human_text,
        rating: (rating > 0.0).then_some(rating),
        rating_dimensions: section.ratings,
        accepted: section.accepted,
        final_text,
        context_rows: &section.context_rows,
        prompt: config.prompts.narrative_for(&section.cluster),
        completion: final_text,
    }
}

/// Build the recommendations record, or `None` if the section has none
#[must_use]
pub fn build_recommendations_record<'a>(
    section: &'a Section,
    config: &DatasetConfig,
) -> Option<RecommendationsRecord<'a>> {
    if !section.has_recs {
        return None;
    }
    let weights = FieldWeightMap::compute(&section.rec_fields, &section.context_rows);
    let final_suggestions = section.final_recommendations();

    tracing::debug!(
        section = %section.id,
        accepted = section.accept_recs,
        suggestions = final_suggestions.len(),
        "built recommendations record"
    );

    Some(RecommendationsRecord {
        section_id: &section.id,
        title: &section.title,
        cluster: &section.cluster,
        questionnaire_id: resolve_questionnaire_id(&section.context_rows),
        source_field_codes: &section.rec_fields,
        field_weights: weights.aggregate(),
        field_instance_weights: config.include_instance_weights.then(|| weights.per_instance()),
        ai_suggestions: &section.ai_recs,
        human_suggestions: &section.human_recs,
        accepted: section.accept_recs,
        final_suggestions,
        context_rows: &section.context_rows,
        prompt: config.prompts.recommendations_for(&section.cluster),
        completion: bullet_completion(final_suggestions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tuneset_model::RatingsDims;
    use tuneset_test_utils::{accept_recs, accept_text, narrative_section, recs_section};

    #[test]
    fn bullets_join_with_newlines() {
        assert_eq!(bullet_completion(&["a", "b", "c"]), "- a\n- b\n- c");
        assert_eq!(bullet_completion::<&str>(&[]), "");
        assert_eq!(bullet_completion(&["only"]), "- only");
    }

    #[test]
    fn narrative_defaults_to_ai_text() {
        let section = narrative_section("s", &["a", "b"]);
        let record = build_narrative_record(&section, &DatasetConfig::default());

        assert_eq!(record.final_text, section.ai_text);
        assert_eq!(record.completion, section.ai_text);
        assert_eq!(record.human_text, "");
        assert_eq!(record.rating, None);
        assert!(!record.accepted);
        assert_eq!(record.questionnaire_id, "S1");
        assert_eq!(record.source_field_codes, ["a", "b"]);
        assert!(record.field_instance_weights.is_none());
    }

    #[test]
    fn accepted_revision_becomes_completion() {
        let mut section = narrative_section("s", &["a"]);
        accept_text(&mut section, "reviewed text");
        section.ratings = RatingsDims::new(4, 5, 5).unwrap();

        let record = build_narrative_record(&section, &DatasetConfig::default());
        assert_eq!(record.final_text, "reviewed text");
        assert_eq!(record.completion, "reviewed text");
        assert_eq!(record.rating, Some(4.7));
        assert_eq!(record.rating_dimensions.honesty, 5);
    }

    #[test]
    fn prompt_mentions_cluster() {
        let section = narrative_section("s", &["a"]);
        let record = build_narrative_record(&section, &DatasetConfig::default());
        assert!(record.prompt.contains("Cluster assessment paragraph"));
    }

    #[test]
    fn no_recommendations_without_flag() {
        let section = narrative_section("s", &["a"]);
        assert!(build_recommendations_record(&section, &DatasetConfig::default()).is_none());
    }

    #[test]
    fn ai_suggestions_when_not_accepted() {
        let section = recs_section("s", &["a"], &["x", "y"]);
        let record = build_recommendations_record(&section, &DatasetConfig::default()).unwrap();
        assert_eq!(record.final_suggestions, ["x", "y"]);
        assert_eq!(record.completion, "- x\n- y");
        assert!(!record.accepted);
    }

    #[test]
    fn accepted_suggestions_replace_ai() {
        let mut section = recs_section("s", &["a"], &["x", "y"]);
        accept_recs(&mut section, &["p", "q", "r"]);
        let record = build_recommendations_record(&section, &DatasetConfig::default()).unwrap();
        assert_eq!(record.final_suggestions, ["p", "q", "r"]);
        assert_eq!(record.ai_suggestions, ["x", "y"]);
        assert_eq!(record.completion, "- p\n- q\n- r");
        assert!(record.accepted);
    }

    #[test]
    fn empty_suggestions_give_empty_completion() {
        let section = recs_section("s", &["a"], &[]);
        let record = build_recommendations_record(&section, &DatasetConfig::default()).unwrap();
        assert_eq!(record.completion, "");
    }

    #[test]
    fn instance_weights_on_request() {
        let section = recs_section("s", &["a", "b"], &["x"]);
        let config = DatasetConfig::default().with_instance_weights(true);
        let record = build_recommendations_record(&section, &config).unwrap();
        let per = record.field_instance_weights.unwrap();
        assert_eq!(per.keys().collect::<Vec<_>>(), ["a", "b"]);
    }
}
