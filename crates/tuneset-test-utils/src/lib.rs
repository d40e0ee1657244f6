//! Testing utilities for tuneset workspace
//!
//! Shared fixtures for sections and context rows.

#![allow(missing_docs)]

use tuneset_model::{ContextRow, Section};

pub use tuneset_model::demo::initial_sections as demo_sections;

pub const TEST_SURVEY: &str = "S1";

pub fn row(survey: &str, site: &str, code: &str) -> ContextRow {
    ContextRow::new(survey, code, format!("Label {code}"), format!("{code}@{site}")).with_site(site)
}

/// One row per code per site, site-major
pub fn multi_site_rows(survey: &str, codes: &[&str], sites: &[&str]) -> Vec<ContextRow> {
    sites
        .iter()
        .flat_map(|site| codes.iter().map(move |code| row(survey, site, code)))
        .collect()
}

/// Rows carrying only a survey id
pub fn survey_rows(surveys: &[&str]) -> Vec<ContextRow> {
    surveys
        .iter()
        .enumerate()
        .map(|(i, survey)| row(survey, "site", &format!("c{i}")))
        .collect()
}

/// Narrative-only section whose fields each have one row
pub fn narrative_section(id: &str, codes: &[&str]) -> Section {
    Section::new(id, format!("Title {id}"), "Cluster", format!("AI narrative for {id}"))
        .with_narrative_fields(codes.iter().copied())
        .with_rows(multi_site_rows(TEST_SURVEY, codes, &["site-a"]))
}

/// Section with recommendations drawing on the same fields as the narrative
pub fn recs_section(id: &str, codes: &[&str], ai_recs: &[&str]) -> Section {
    narrative_section(id, codes)
        .with_rec_fields(codes.iter().copied())
        .with_ai_recs(ai_recs.iter().copied())
}

/// Accept a reviewer revision in place
pub fn accept_text(section: &mut Section, text: &str) {
    section.human_text = text.to_string();
    section.accepted = true;
}

/// Accept reviewer suggestions in place
pub fn accept_recs(section: &mut Section, recs: &[&str]) {
    section.human_recs = recs.iter().map(|s| (*s).to_string()).collect();
    section.accept_recs = true;
}
