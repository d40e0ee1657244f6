//! The unit of review

use crate::ratings::RatingsDims;
use crate::row::ContextRow;
use serde::{Deserialize, Serialize};

/// One topical unit of the report under review
///
/// AI content (`ai_text`, `ai_recs`) is never mutated after seeding;
/// reviewer content and flags are replaced through session actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique section identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Category label used in prompts
    pub cluster: String,
    /// Generated narrative
    pub ai_text: String,
    /// Reviewer revision (empty until edited)
    #[serde(default)]
    pub human_text: String,
    /// Per-dimension reviewer scores
    #[serde(default)]
    pub ratings: RatingsDims,
    /// Adopt `human_text` as final
    #[serde(default)]
    pub accepted: bool,
    /// Whether this section participates in the recommendations dataset
    #[serde(default)]
    pub has_recs: bool,
    /// Generated suggestions
    #[serde(default)]
    pub ai_recs: Vec<String>,
    /// Reviewer suggestions
    #[serde(default)]
    pub human_recs: Vec<String>,
    /// Adopt `human_recs` as final
    #[serde(default)]
    pub accept_recs: bool,
    /// Field codes the narrative draws on, most salient first
    #[serde(default)]
    pub narrative_fields: Vec<String>,
    /// Field codes the recommendations draw on, most salient first
    #[serde(default)]
    pub rec_fields: Vec<String>,
    /// Chart variant shown next to the narrative
    #[serde(default)]
    pub chart: ChartKind,
    /// Chart points
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
    /// Chart title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_title: Option<String>,
    /// X axis label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    /// Y axis label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    /// Context rows belonging to this section
    #[serde(default)]
    pub context_rows: Vec<ContextRow>,
}

impl Section {
    /// Create a section with an AI draft and nothing else
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        cluster: impl Into<String>,
        ai_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cluster: cluster.into(),
            ai_text: ai_text.into(),
            human_text: String::new(),
            ratings: RatingsDims::default(),
            accepted: false,
            has_recs: false,
            ai_recs: Vec::new(),
            human_recs: Vec::new(),
            accept_recs: false,
            narrative_fields: Vec::new(),
            rec_fields: Vec::new(),
            chart: ChartKind::None,
            chart_data: Vec::new(),
            chart_title: None,
            x_label: None,
            y_label: None,
            context_rows: Vec::new(),
        }
    }

    /// With generated suggestions; enables the recommendations record
    #[must_use]
    pub fn with_ai_recs<I, S>(mut self, recs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.has_recs = true;
        self.ai_recs = recs.into_iter().map(Into::into).collect();
        self
    }

    /// With narrative field codes
    #[must_use]
    pub fn with_narrative_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.narrative_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// With recommendation field codes
    #[must_use]
    pub fn with_rec_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rec_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// With context rows
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<ContextRow>) -> Self {
        self.context_rows = rows;
        self
    }

    /// With chart
    #[must_use]
    pub fn with_chart(mut self, chart: ChartKind, data: Vec<ChartPoint>) -> Self {
        self.chart = chart;
        self.chart_data = data;
        self
    }

    /// With chart title and axis labels
    #[must_use]
    pub fn with_chart_labels(
        mut self,
        title: impl Into<String>,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> Self {
        self.chart_title = Some(title.into());
        self.x_label = x_label.map(str::to_string);
        self.y_label = y_label.map(str::to_string);
        self
    }

    /// Overall rating, derived from `ratings`
    #[inline]
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.ratings.overall()
    }

    /// Final narrative: the revision if accepted and non-blank, else the AI draft
    #[must_use]
    pub fn final_narrative(&self) -> &str {
        if self.accepted && !self.human_text.trim().is_empty() {
            &self.human_text
        } else {
            &self.ai_text
        }
    }

    /// Final suggestions: the reviewer list if accepted and non-empty, else the AI list
    #[must_use]
    pub fn final_recommendations(&self) -> &[String] {
        if self.accept_recs && !self.human_recs.is_empty() {
            &self.human_recs
        } else {
            &self.ai_recs
        }
    }

    /// Narrative then recommendation codes, de-duplicated, order kept
    #[must_use]
    pub fn focus_codes(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for code in self.narrative_fields.iter().chain(&self.rec_fields) {
            if !out.contains(&code.as_str()) {
                out.push(code);
            }
        }
        out
    }

    /// Whether the reviewer has touched this section
    #[must_use]
    pub fn is_reviewed(&self) -> bool {
        self.rating() > 0.0
            || !self.human_text.trim().is_empty()
            || self.accepted
            || (self.has_recs && (!self.human_recs.is_empty() || self.accept_recs))
    }
}

/// Chart variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Category bar chart
    Bar,
    /// Share pie chart
    Pie,
    /// No chart
    #[default]
    None,
}

impl ChartKind {
    /// Whether a chart is rendered at all
    #[inline]
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        match self {
            Self::Bar | Self::Pie => true,
            Self::None => false,
        }
    }
}

/// One chart datum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Category or slice name
    #[serde(alias = "category", alias = "name")]
    pub label: String,
    /// Percentage or count
    pub value: f64,
}

impl ChartPoint {
    /// Create a point
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratings::RatingDim;
    use pretty_assertions::assert_eq;

    fn section() -> Section {
        Section::new("s1", "Title", "WASH", "ai draft").with_ai_recs(["x", "y"])
    }

    #[test]
    fn section_with_out_of_range_rating_fails_to_load() {
        let json = r#"{
            "id": "s1",
            "title": "Title",
            "cluster": "WASH",
            "aiText": "ai draft",
            "ratings": {"helpfulness": 6}
        }"#;
        assert!(serde_json::from_str::<Section>(json).is_err());
    }

    #[test]
    fn final_narrative_requires_accept_and_text() {
        let mut s = section();
        assert_eq!(s.final_narrative(), "ai draft");

        s.human_text = "revised".to_string();
        assert_eq!(s.final_narrative(), "ai draft");

        s.accepted = true;
        assert_eq!(s.final_narrative(), "revised");

        s.human_text = "   \n".to_string();
        assert_eq!(s.final_narrative(), "ai draft");
    }

    #[test]
    fn final_recommendations_require_accept_and_items() {
        let mut s = section();
        s.accept_recs = true;
        assert_eq!(s.final_recommendations(), ["x", "y"]);

        s.human_recs = vec!["z".to_string()];
        assert_eq!(s.final_recommendations(), ["z"]);

        s.accept_recs = false;
        assert_eq!(s.final_recommendations(), ["x", "y"]);
    }

    #[test]
    fn rating_follows_dimensions() {
        let mut s = section();
        assert_eq!(s.rating(), 0.0);
        s.ratings = s.ratings.with(RatingDim::Helpfulness, 4).unwrap();
        assert_eq!(s.rating(), 1.3);
    }

    #[test]
    fn focus_codes_union_in_order() {
        let s = section()
            .with_narrative_fields(["a", "b"])
            .with_rec_fields(["b", "c", "a"]);
        assert_eq!(s.focus_codes(), vec!["a", "b", "c"]);
    }

    #[test]
    fn reviewed_detection() {
        let mut s = section();
        assert!(!s.is_reviewed());
        s.accept_recs = true;
        assert!(s.is_reviewed());

        let mut plain = Section::new("p", "P", "Multi-sector", "text");
        plain.accept_recs = true;
        assert!(!plain.is_reviewed(), "accept_recs ignored without recommendations");
    }

    #[test]
    fn deserializes_camel_case_and_ignores_rating() {
        let s: Section = serde_json::from_str(
            r#"{
                "id": "wash", "title": "WASH Findings", "cluster": "WASH",
                "aiText": "draft", "rating": 4.2, "hasRecs": true,
                "aiRecs": ["a"], "chart": "bar",
                "chartData": [{"category": "Improved", "value": 62}]
            }"#,
        )
        .unwrap();
        assert!(s.has_recs);
        assert_eq!(s.chart, ChartKind::Bar);
        assert_eq!(s.chart_data[0].label, "Improved");
        assert_eq!(s.rating(), 0.0);
    }

    #[test]
    fn chart_kind_rendering() {
        assert!(ChartKind::Bar.is_rendered());
        assert!(ChartKind::Pie.is_rendered());
        assert!(!ChartKind::None.is_rendered());
    }
}
