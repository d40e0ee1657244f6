//! Self-verification suite
//!
//! Re-parses the assembled lines as plain JSON and checks the structural
//! and numeric invariants of the export. Checks run in [`Check::ALL`]
//! order and the first failure aborts the run.

use crate::assembler::Dataset;
use crate::config::{DatasetConfig, VerifyConfig};
use crate::digest::DatasetDigest;
use crate::error::VerifyError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};
use tuneset_model::Section;

/// Message reported when every check passes
pub const PASS_MESSAGE: &str = "Self-tests passed";

/// One verification check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Total line count
    LineCount,
    /// Every line parses as JSON
    ValidJson,
    /// Non-empty prompt string
    Prompt,
    /// Non-empty questionnaire id
    QuestionnaireId,
    /// Field weights present as an object
    FieldWeights,
    /// Field weights sum to about 1
    WeightSum,
    /// Recommendations completion is a newline bullet list
    CompletionBullets,
    /// One recommendations record per section with recommendations
    RecommendationCount,
    /// Anchor sections reference their anchor code
    Anchor,
    /// Sections without recommendations emit no recommendations record
    NoRecommendations,
    /// Body splits back into the same lines
    LineSplit,
}

impl Check {
    /// All checks in execution order
    pub const ALL: [Self; 11] = [
        Self::LineCount,
        Self::ValidJson,
        Self::Prompt,
        Self::QuestionnaireId,
        Self::FieldWeights,
        Self::WeightSum,
        Self::CompletionBullets,
        Self::RecommendationCount,
        Self::Anchor,
        Self::NoRecommendations,
        Self::LineSplit,
    ];

    /// Short name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LineCount => "line_count",
            Self::ValidJson => "valid_json",
            Self::Prompt => "prompt",
            Self::QuestionnaireId => "questionnaire_id",
            Self::FieldWeights => "field_weights",
            Self::WeightSum => "weight_sum",
            Self::CompletionBullets => "completion_bullets",
            Self::RecommendationCount => "recommendation_count",
            Self::Anchor => "anchor",
            Self::NoRecommendations => "no_recommendations",
            Self::LineSplit => "line_split",
        }
    }
}

impl Display for Check {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a passing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    /// Checks that ran, in order
    pub checks: Vec<Check>,
    /// Lines verified
    pub line_count: usize,
    /// Digest of the verified body
    pub digest: DatasetDigest,
}

impl VerificationReport {
    /// Confirmation message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        PASS_MESSAGE
    }

    /// Whether a check ran
    #[must_use]
    pub fn ran(&self, check: Check) -> bool {
        self.checks.contains(&check)
    }
}

/// Assemble the dataset for `sections` and verify it
///
/// # Errors
/// Returns the first failing check, or [`VerifyError::Assembly`] if the
/// dataset cannot be built
pub fn run_self_tests(
    sections: &[Section],
    dataset_config: &DatasetConfig,
    verify_config: &VerifyConfig,
) -> Result<VerificationReport, VerifyError> {
    let dataset = Dataset::assemble(sections, dataset_config)?;
    verify_lines(&dataset.lines, sections, verify_config)
}

/// Verify pre-built JSONL lines against the sections they came from
///
/// # Errors
/// Returns the first failing check
pub fn verify_lines<S: AsRef<str>>(
    lines: &[S],
    sections: &[Section],
    config: &VerifyConfig,
) -> Result<VerificationReport, VerifyError> {
    let result = Verifier::new(lines, sections, config).run();
    match &result {
        Ok(report) => tracing::info!(
            lines = report.line_count,
            checks = report.checks.len(),
            digest = %report.digest.short(),
            "{PASS_MESSAGE}"
        ),
        Err(err) => tracing::warn!(error = %err, "self-tests failed"),
    }
    result
}

struct Verifier<'a, S> {
    lines: &'a [S],
    sections: &'a [Section],
    config: &'a VerifyConfig,
    checks: Vec<Check>,
}

impl<'a, S: AsRef<str>> Verifier<'a, S> {
    fn new(lines: &'a [S], sections: &'a [Section], config: &'a VerifyConfig) -> Self {
        Self {
            lines,
            sections,
            config,
            checks: Vec::with_capacity(Check::ALL.len()),
        }
    }

    fn expected_recommendations(&self) -> usize {
        self.sections.iter().filter(|s| s.has_recs).count()
    }

    fn run(mut self) -> Result<VerificationReport, VerifyError> {
        let expected = self.sections.len() + self.expected_recommendations();
        if self.lines.len() != expected {
            return Err(VerifyError::LineCount {
                expected,
                actual: self.lines.len(),
            });
        }
        self.checks.push(Check::LineCount);

        let parsed = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str::<Value>(line.as_ref())
                    .map_err(|_| VerifyError::InvalidJson { line: i + 1 })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.checks.push(Check::ValidJson);

        for (i, record) in parsed.iter().enumerate() {
            check_record(i + 1, record, self.config)?;
        }
        self.checks.extend([
            Check::Prompt,
            Check::QuestionnaireId,
            Check::FieldWeights,
            Check::WeightSum,
            Check::CompletionBullets,
        ]);

        let expected_recs = self.expected_recommendations();
        let actual_recs = parsed.iter().filter(|r| is_kind(r, "recommendations")).count();
        if actual_recs != expected_recs {
            return Err(VerifyError::RecommendationCount {
                expected: expected_recs,
                actual: actual_recs,
            });
        }
        self.checks.push(Check::RecommendationCount);

        if let Some(anchor) = &self.config.anchor {
            let referenced = find_record(&parsed, "narrative", &anchor.section_id)
                .and_then(|r| r.get("source_field_codes"))
                .and_then(Value::as_array)
                .is_some_and(|codes| codes.iter().any(|c| c.as_str() == Some(anchor.code.as_str())));
            if !referenced {
                return Err(VerifyError::AnchorMissing {
                    section_id: anchor.section_id.clone(),
                    code: anchor.code.clone(),
                });
            }
            self.checks.push(Check::Anchor);
        }

        if let Some(section_id) = &self.config.no_recs_section {
            if find_record(&parsed, "recommendations", section_id).is_some() {
                return Err(VerifyError::UnexpectedRecommendations {
                    section_id: section_id.clone(),
                });
            }
            self.checks.push(Check::NoRecommendations);
        }

        if !self.lines.is_empty() {
            let joined = self
                .lines
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join("\n");
            let actual = joined.split('\n').count();
            if actual != self.lines.len() {
                return Err(VerifyError::LineSplit {
                    expected: self.lines.len(),
                    actual,
                });
            }
            self.checks.push(Check::LineSplit);
        }

        Ok(VerificationReport {
            checks: self.checks,
            line_count: self.lines.len(),
            digest: DatasetDigest::of_lines(self.lines),
        })
    }
}

/// Per-record checks: prompt through completion bullets
fn check_record(line: usize, record: &Value, config: &VerifyConfig) -> Result<(), VerifyError> {
    let prompt_ok = record
        .get("prompt")
        .and_then(Value::as_str)
        .is_some_and(|p| !p.is_empty());
    if !prompt_ok {
        return Err(VerifyError::MissingPrompt { line });
    }

    if !record.get("questionnaire_id").is_some_and(is_truthy) {
        return Err(VerifyError::MissingQuestionnaireId { line });
    }

    let weights = record
        .get("field_weights")
        .and_then(Value::as_object)
        .ok_or(VerifyError::MissingFieldWeights { line })?;

    let has_sources = record
        .get("source_field_codes")
        .and_then(Value::as_array)
        .is_some_and(|codes| !codes.is_empty());
    if has_sources {
        let sum = weight_sum(weights);
        if !config.weight_sum_in_band(sum) {
            return Err(VerifyError::WeightSumOutOfBand { line, sum });
        }
    }

    if is_kind(record, "recommendations") {
        let suggestions = record
            .get("final_suggestions")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if suggestions > 0 {
            let completion = record
                .get("completion")
                .and_then(Value::as_str)
                .ok_or(VerifyError::CompletionNotBulleted { line })?;
            if !completion.contains('\n') {
                return Err(VerifyError::CompletionNotBulleted { line });
            }
            let bullets = completion
                .split('\n')
                .filter(|l| l.trim().starts_with("- "))
                .count();
            if bullets != suggestions {
                return Err(VerifyError::BulletMismatch {
                    line,
                    bullets,
                    suggestions,
                });
            }
        }
    }

    Ok(())
}

/// Sum of weight values; a non-numeric value poisons the sum with NaN
fn weight_sum(weights: &Map<String, Value>) -> f64 {
    weights
        .values()
        .map(|v| v.as_f64().unwrap_or(f64::NAN))
        .sum()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_kind(record: &Value, kind: &str) -> bool {
    record.get("type").and_then(Value::as_str) == Some(kind)
}

fn find_record<'v>(records: &'v [Value], kind: &str, section_id: &str) -> Option<&'v Value> {
    records
        .iter()
        .find(|r| is_kind(r, kind) && r.get("section_id").and_then(Value::as_str) == Some(section_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::build_jsonl_lines;
    use serde_json::json;
    use tuneset_test_utils::{narrative_section, recs_section};

    fn sections() -> Vec<Section> {
        vec![
            narrative_section("a", &["x", "y"]),
            recs_section("b", &["x"], &["one", "two"]),
        ]
    }

    fn replace_line(lines: &mut [String], index: usize, f: impl FnOnce(&mut Value)) {
        let mut value: Value = serde_json::from_str(&lines[index]).unwrap();
        f(&mut value);
        lines[index] = value.to_string();
    }

    #[test]
    fn clean_dataset_passes_structural_checks() {
        let report =
            run_self_tests(&sections(), &DatasetConfig::default(), &VerifyConfig::structural_only()).unwrap();
        assert_eq!(report.message(), "Self-tests passed");
        assert_eq!(report.line_count, 3);
        assert!(report.ran(Check::LineSplit));
        assert!(!report.ran(Check::Anchor));
        assert!(!report.ran(Check::NoRecommendations));
    }

    #[test]
    fn missing_line_fails_count() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        lines.pop();
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::LineCount { expected: 3, actual: 2 }));
    }

    #[test]
    fn garbage_line_is_named() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        lines[1] = "{not json".to_string();
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::InvalidJson { line: 2 }));
    }

    #[test]
    fn empty_prompt_rejected() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 0, |v| v["prompt"] = json!(""));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::MissingPrompt { line: 1 }));
    }

    #[test]
    fn empty_questionnaire_rejected() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 2, |v| v["questionnaire_id"] = json!(""));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::MissingQuestionnaireId { line: 3 }));
    }

    #[test]
    fn array_weights_rejected() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 0, |v| v["field_weights"] = json!([0.5, 0.5]));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::MissingFieldWeights { line: 1 }));
    }

    #[test]
    fn low_weight_sum_rejected() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 0, |v| v["field_weights"] = json!({"x": 0.5, "y": 0.2}));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        match err {
            VerifyError::WeightSumOutOfBand { line, sum } => {
                assert_eq!(line, 1);
                assert!((sum - 0.7).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_weight_poisons_sum() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 0, |v| v["field_weights"] = json!({"x": "1", "y": 0}));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::WeightSumOutOfBand { line: 1, .. }));
    }

    #[test]
    fn weight_sum_skipped_without_sources() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 0, |v| {
            v["source_field_codes"] = json!([]);
            v["field_weights"] = json!({});
        });
        assert!(verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).is_ok());
    }

    #[test]
    fn unbulleted_completion_rejected() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 2, |v| v["completion"] = json!("one, two"));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::CompletionNotBulleted { line: 3 }));
    }

    #[test]
    fn bullet_count_mismatch_rejected() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 2, |v| v["completion"] = json!("- one\n- two\n- three"));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::BulletMismatch {
                line: 3,
                bullets: 3,
                suggestions: 2
            }
        ));
    }

    #[test]
    fn single_suggestion_is_not_a_list() {
        let sections = vec![recs_section("solo", &["x"], &["only"])];
        let err = run_self_tests(&sections, &DatasetConfig::default(), &VerifyConfig::structural_only())
            .unwrap_err();
        assert!(matches!(err, VerifyError::CompletionNotBulleted { line: 2 }));
    }

    #[test]
    fn retyped_record_fails_recommendation_count() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        replace_line(&mut lines, 2, |v| v["type"] = json!("narrative"));
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        assert!(matches!(err, VerifyError::RecommendationCount { expected: 1, actual: 0 }));
    }

    #[test]
    fn anchor_checked_when_configured() {
        let config = VerifyConfig::structural_only().with_anchor("a", "y");
        assert!(run_self_tests(&sections(), &DatasetConfig::default(), &config).unwrap().ran(Check::Anchor));

        let config = VerifyConfig::structural_only().with_anchor("a", "zzz");
        let err = run_self_tests(&sections(), &DatasetConfig::default(), &config).unwrap_err();
        assert_eq!(err.to_string(), "'a' narrative should reference 'zzz'.");
    }

    #[test]
    fn forbidden_recommendations_detected() {
        let config = VerifyConfig::structural_only().with_no_recs_section("b");
        let err = run_self_tests(&sections(), &DatasetConfig::default(), &config).unwrap_err();
        assert!(matches!(err, VerifyError::UnexpectedRecommendations { .. }));
    }

    #[test]
    fn pretty_printed_line_breaks_split() {
        let mut lines = build_jsonl_lines(&sections()).unwrap();
        let value: Value = serde_json::from_str(&lines[0]).unwrap();
        lines[0] = serde_json::to_string_pretty(&value).unwrap();
        let err = verify_lines(&lines, &sections(), &VerifyConfig::structural_only()).unwrap_err();
        match err {
            VerifyError::LineSplit { expected, actual } => {
                assert_eq!(expected, 3);
                assert!(actual > 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_passes_without_split_check() {
        let report = verify_lines::<String>(&[], &[], &VerifyConfig::structural_only()).unwrap();
        assert_eq!(report.line_count, 0);
        assert!(!report.ran(Check::LineSplit));
    }

    #[test]
    fn checks_listed_in_order() {
        let report =
            run_self_tests(&sections(), &DatasetConfig::default(), &VerifyConfig::structural_only().with_anchor("a", "x"))
                .unwrap();
        let positions: Vec<usize> = report
            .checks
            .iter()
            .map(|c| Check::ALL.iter().position(|a| a == c).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
