//! Subcommand implementations
//!
//! Each command writes its report to the given writer so it can be
//! captured in tests; `main` passes stdout.

use crate::config::AppConfig;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tuneset_dataset::{
    export_jsonl, run_self_tests, verify_lines, Dataset, DatasetConfig, VerificationReport, VerifyError,
};
use tuneset_model::Section;
use tuneset_provenance::{resolve_questionnaire_id, FieldWeightMap};
use tuneset_session::SessionStore;

/// Which field list of a section to weigh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    /// `narrative_fields`
    Narrative,
    /// `rec_fields`
    Recommendations,
}

impl FieldSet {
    fn fields(self, section: &Section) -> &[String] {
        match self {
            Self::Narrative => &section.narrative_fields,
            Self::Recommendations => &section.rec_fields,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Narrative => "narrative",
            Self::Recommendations => "recommendations",
        }
    }
}

/// Print every JSONL line
///
/// # Errors
/// Returns error if assembly or the write fails
pub fn preview(out: &mut impl Write, sections: &[Section], config: &DatasetConfig) -> anyhow::Result<Dataset> {
    let dataset = Dataset::assemble(sections, config)?;
    for line in &dataset.lines {
        writeln!(out, "{line}")?;
    }
    tracing::info!(lines = dataset.len(), digest = %dataset.digest().short(), "preview complete");
    Ok(dataset)
}

/// Write the export file
///
/// `target` defaults to the configured file name in the working
/// directory; a directory target receives the configured file name.
///
/// # Errors
/// Returns error if assembly or the write fails
pub fn export(
    out: &mut impl Write,
    sections: &[Section],
    config: &DatasetConfig,
    target: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let artifact = export_jsonl(sections, config)?;
    let target = target.unwrap_or_else(|| Path::new("."));
    let path = artifact
        .write_to(target)
        .with_context(|| format!("export to {} failed", target.display()))?;
    writeln!(
        out,
        "Wrote {} ({} lines, {}, digest {})",
        path.display(),
        artifact.line_count,
        artifact.mime,
        artifact.digest.short()
    )?;
    Ok(path)
}

/// Run the self-verification suite and report the outcome
///
/// With `input`, the lines of an existing export are verified against
/// `sections` instead of freshly assembled ones. Returns whether every
/// check passed.
///
/// # Errors
/// Returns error only if `input` cannot be read or the report cannot be
/// written; failed checks are reported as `Ok(false)`
pub fn verify(
    out: &mut impl Write,
    sections: &[Section],
    config: &AppConfig,
    input: Option<&Path>,
) -> anyhow::Result<bool> {
    let result = match input {
        Some(path) => {
            let body = fs::read_to_string(path)
                .with_context(|| format!("failed to read export {}", path.display()))?;
            let body = body.strip_suffix('\n').unwrap_or(&body);
            let lines: Vec<&str> = if body.is_empty() {
                Vec::new()
            } else {
                body.split('\n').collect()
            };
            verify_lines(&lines, sections, &config.verify)
        }
        None => run_self_tests(sections, &config.export, &config.verify),
    };
    report_verification(out, result)
}

fn report_verification(
    out: &mut impl Write,
    result: Result<VerificationReport, VerifyError>,
) -> anyhow::Result<bool> {
    match result {
        Ok(report) => {
            writeln!(
                out,
                "{} ({} checks, {} lines, digest {})",
                report.message(),
                report.checks.len(),
                report.line_count,
                report.digest.short()
            )?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "Self-tests failed: {err}")?;
            Ok(false)
        }
    }
}

/// Print per-row weight shares and the exported weight map for a section
///
/// # Errors
/// Returns error if the section is unknown or the write fails
pub fn weights(out: &mut impl Write, store: &SessionStore, id: &str, set: FieldSet) -> anyhow::Result<()> {
    let section = store
        .section(id)
        .with_context(|| format!("unknown section '{id}'"))?;
    let fields = set.fields(section);
    let map = FieldWeightMap::compute(fields, &section.context_rows);

    writeln!(
        out,
        "{} [{}] questionnaire {}",
        section.id,
        set.as_str(),
        resolve_questionnaire_id(&section.context_rows)
    )?;
    writeln!(out, "{:<12} {:<20} {:>8}", "SITE", "CODE", "SHARE")?;
    for (row, share) in section.context_rows.iter().zip(map.row_shares(&section.context_rows)) {
        writeln!(
            out,
            "{:<12} {:<20} {:>8.4}",
            row.site.as_deref().unwrap_or("-"),
            row.code,
            share
        )?;
    }

    let unmatched = map.unmatched_codes();
    if !unmatched.is_empty() {
        writeln!(out, "unmatched: {}", unmatched.join(", "))?;
    }
    writeln!(out, "field_weights: {}", serde_json::to_string(&map.aggregate())?)?;
    Ok(())
}

/// List sections with review status and overall progress
///
/// # Errors
/// Returns error if the write fails
pub fn list_sections(out: &mut impl Write, store: &SessionStore) -> anyhow::Result<()> {
    for section in store.sections() {
        let mark = if section.is_reviewed() { "x" } else { " " };
        let recs = if section.has_recs { "recs" } else { "-" };
        writeln!(
            out,
            "[{mark}] {:<12} {:<16} {:<5} {:.1}  {}",
            section.id,
            section.cluster,
            recs,
            section.rating(),
            section.title
        )?;
    }
    writeln!(
        out,
        "{}/{} reviewed ({}%)",
        store.reviewed_count(),
        store.len(),
        store.reviewed_pct()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn preview_prints_one_line_per_record() {
        let store = SessionStore::from_demo();
        let text = output(|out| preview(out, store.sections(), &DatasetConfig::default()).map(|_| ()));
        assert_eq!(text.lines().count(), 11);
    }

    #[test]
    fn verify_reports_pass() {
        let store = SessionStore::from_demo();
        let mut buf = Vec::new();
        let passed = verify(&mut buf, store.sections(), &AppConfig::default(), None).unwrap();
        assert!(passed);
        assert!(String::from_utf8(buf).unwrap().starts_with("Self-tests passed"));
    }

    #[test]
    fn weights_lists_every_row() {
        let store = SessionStore::from_demo();
        let text = output(|out| weights(out, &store, "wash", FieldSet::Narrative));
        let wash = store.section("wash").unwrap();
        // header, column titles, rows, weight map
        assert_eq!(text.lines().count(), wash.context_rows.len() + 3);
        assert!(text.contains("questionnaire MSNA-2025"));
        assert!(text.contains("field_weights: {\"w_source_main\":"));
    }

    #[test]
    fn weights_for_unknown_section_fail() {
        let store = SessionStore::from_demo();
        let mut buf = Vec::new();
        assert!(weights(&mut buf, &store, "missing", FieldSet::Narrative).is_err());
    }

    #[test]
    fn section_list_ends_with_progress() {
        let store = SessionStore::from_demo();
        let text = output(|out| list_sections(out, &store));
        assert_eq!(text.lines().last(), Some("0/6 reviewed (0%)"));
    }
}
