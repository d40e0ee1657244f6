//! Six-section multi-sector needs assessment used to seed a session.
//!
//! Every section carries one row per field code for each of three sites
//! (Rivne, Kovel, Lutsk) of the `MSNA-2025` survey. `overview` has no
//! recommendations and the `wash` narrative references `w_source_main`.

use crate::row::{ContextRow, ContextValue};
use crate::section::{ChartKind, ChartPoint, Section};

/// Survey identifier shared by every demo row
pub const DEMO_SURVEY: &str = "MSNA-2025";

/// Sites in row order
pub const DEMO_SITES: [&str; 3] = ["Rivne", "Kovel", "Lutsk"];

/// Seed sections in display order
#[must_use]
pub fn initial_sections() -> Vec<Section> {
    vec![overview(), wash(), health(), protection(), food(), shelter()]
}

/// One field observed at the three demo sites
struct Field {
    code: &'static str,
    label: &'static str,
    values: [ContextValue; 3],
}

fn field<V: Into<ContextValue>>(code: &'static str, label: &'static str, values: [V; 3]) -> Field {
    Field {
        code,
        label,
        values: values.map(Into::into),
    }
}

/// Site-major rows: all fields for Rivne, then Kovel, then Lutsk
fn site_rows(fields: &[Field]) -> Vec<ContextRow> {
    DEMO_SITES
        .iter()
        .enumerate()
        .flat_map(|(i, site)| {
            fields.iter().map(move |f| {
                ContextRow::new(DEMO_SURVEY, f.code, f.label, f.values[i].clone()).with_site(*site)
            })
        })
        .collect()
}

fn codes(fields: &[Field]) -> Vec<&'static str> {
    fields.iter().map(|f| f.code).collect()
}

fn overview() -> Section {
    let fields = [
        field("loc_hromada", "Hromada", ["Rivne-1", "Kovel-2", "Lutsk-3"]),
        field("sample_n", "Households Surveyed", [312, 198, 276]),
        field(
            "dates",
            "Data Collection Window",
            [
                "2025-05-12 → 2025-05-20",
                "2025-05-15 → 2025-05-22",
                "2025-05-10 → 2025-05-18",
            ],
        ),
    ];
    Section::new(
        "overview",
        "Context Overview",
        "Multi-sector",
        "Between 10–22 May 2025, teams completed 786 household interviews across Rivne-1, Kovel-2 and Lutsk-3 hromadas (MSNA-2025). Rising prices and disrupted services continue to shape needs, with host communities absorbing a fluid displaced population. While access remains comparatively better in Lutsk-3, respondents in Kovel-2 cite longer travel times to key services and in Rivne-1 highlight budget pressure from higher utility and food costs. Across sites, priority concerns converge on reliable access to safe water, basic health care, and purchasing power for essential goods.",
    )
    .with_narrative_fields(codes(&fields))
    .with_rows(site_rows(&fields))
}

fn wash() -> Section {
    let fields = [
        field(
            "w_source_main",
            "Main Water Source",
            ["piped 41% | borehole 21%", "piped 36% | borehole 24%", "piped 48% | borehole 19%"],
        ),
        field(
            "w_treat",
            "Water Treatment",
            ["boil 18% | chlorine 27%", "boil 12% | chlorine 33%", "boil 16% | chlorine 22%"],
        ),
        field("dist_to_point_km", "Avg Distance to Point (km)", [1.3, 1.8, 1.1]),
    ];
    Section::new(
        "wash",
        "WASH Findings",
        "WASH",
        "Across the three hromadas, 62% of households report using improved sources while 38% rely on unimproved or trucked options with inconsistent treatment. Source patterns vary by site: in Rivne piped (41%) and boreholes (21%) dominate; Kovel shows a smaller piped share (36%) and a higher reliance on boreholes (24%); Lutsk has the highest piped coverage (48%) but still reports borehole use (19%). Chlorination is not universal—reported at 27% in Rivne, 33% in Kovel, and 22% in Lutsk—indicating gaps in residual monitoring. Distance to water points is a practical barrier, especially in Kovel (1.8 km on average) compared to Rivne (1.3 km) and Lutsk (1.1 km). Households in Kovel therefore face the highest collection burden, while Rivne and Lutsk point to affordability and quality concerns. Priority is to standardize chlorination at communal points, supply spare parts for borehole pumps in rural pockets, and target hygiene kits to newly displaced households.",
    )
    .with_ai_recs([
        "Support chlorination at communal water points and monitor residuals weekly.",
        "Provide spare parts for borehole pumps in rural sites.",
        "Targeted hygiene kits for newly displaced HHs.",
    ])
    .with_narrative_fields(codes(&fields))
    .with_rec_fields(codes(&fields))
    .with_chart(
        ChartKind::Bar,
        vec![
            ChartPoint::new("Improved", 62.0),
            ChartPoint::new("Unimproved", 22.0),
            ChartPoint::new("Trucked", 16.0),
        ],
    )
    .with_chart_labels("Household Main Water Source", Some("Source type"), Some("% of households"))
    .with_rows(site_rows(&fields))
}

fn health() -> Section {
    let fields = [
        field(
            "func_level",
            "Facility Functionality",
            [
                "functional 70% | limited 20% | closed 10%",
                "functional 66% | limited 24% | closed 10%",
                "functional 73% | limited 18% | closed 9%",
            ],
        ),
        field(
            "stockouts_30d",
            "Stockouts (30 days)",
            ["34% facilities", "28% facilities", "31% facilities"],
        ),
        field("dist_fac_km", "Avg Distance to Facility (km)", [8.6, 11.2, 6.9]),
    ];
    Section::new(
        "health",
        "Health Findings",
        "Health",
        "Facility functionality is generally strong, with 70% reported fully functional and 20% operating with limitations; 10% are closed. Medicine availability is uneven: recent stockouts affected roughly a third of facilities in Rivne (34%) and about a third in Lutsk (31%), with somewhat lower levels in Kovel (28%). Geographic access remains a constraint for more remote settlements—average distance to the nearest facility peaks in Kovel (11.2 km) versus Rivne (8.6 km) and Lutsk (6.9 km). Households in Kovel are most likely to defer care due to travel and cost, while Rivne and Lutsk cite user fees and intermittent medicine availability. Priority actions are to preposition chronic medications (e.g., hypertension, diabetes) to peripheral points, deploy mobile clinics to settlements >10 km from facilities—especially in Kovel hromada—and consider temporary fee waivers for vulnerable groups across sites.",
    )
    .with_ai_recs([
        "Preposition chronic meds (HTN, DM) to peripheral facilities.",
        "Deploy mobile clinics to settlements >10 km from nearest facility.",
        "Waive user fees temporarily for vulnerable groups.",
    ])
    .with_narrative_fields(codes(&fields))
    .with_rec_fields(codes(&fields))
    .with_chart(
        ChartKind::Pie,
        vec![
            ChartPoint::new("Functional", 70.0),
            ChartPoint::new("Limited", 20.0),
            ChartPoint::new("Closed", 10.0),
        ],
    )
    .with_chart_labels("Facility Functionality Status", None, None)
    .with_rows(site_rows(&fields))
}

fn protection() -> Section {
    let fields = [
        field(
            "safety_day_night",
            "Perceived Safety (day/night)",
            ["78% / 44%", "81% / 47%", "76% / 51%"],
        ),
        field("lost_docs", "Missing Documentation", ["21% of HH", "18% of HH", "22% of HH"]),
        field(
            "hotspots",
            "Hotspots",
            ["markets, water points", "markets, water points", "markets, water points"],
        ),
    ];
    Section::new(
        "protection",
        "Protection Findings",
        "Protection",
        "Perceived safety is consistently higher during daytime than after dark, with notable night-time concerns around water points and markets. Reported day/night safety is 78%/44% in Rivne, 81%/47% in Kovel, and 76%/51% in Lutsk—indicating the sharpest drop after dark in Rivne. Documentation loss among displaced households remains a barrier to services (≈21% in Rivne, 18% in Kovel, 22% in Lutsk). Households frequently identify markets and water points as hotspots for harassment or theft. Priorities include installing solar lighting near key water points and market approaches (especially in Rivne and Lutsk), operating civil documentation help desks with legal aid partners (targeting areas with higher reported loss), and running group-based PSS for caregivers and adolescents to normalize help-seeking and strengthen coping.",
    )
    .with_ai_recs([
        "Install solar lighting at water points and market approaches.",
        "Run civil documentation help desks with legal aid partners.",
        "Facilitate PSS group sessions for caregivers and adolescents.",
    ])
    .with_narrative_fields(codes(&fields))
    .with_rec_fields(codes(&fields))
    .with_rows(site_rows(&fields))
}

fn food() -> Section {
    let fields = [
        field(
            "fcs_cat",
            "FCS Category",
            [
                "acceptable 57% | borderline 29% | poor 14%",
                "acceptable 59% | borderline 26% | poor 15%",
                "acceptable 58% | borderline 29% | poor 13%",
            ],
        ),
        field("rcsi_high", "rCSI ≥4 (7 days)", ["58% of HH", "55% of HH", "60% of HH"]),
        field(
            "mkt_function",
            "Market Functionality",
            ["open 6 days/week", "open 5 days/week", "open 6 days/week"],
        ),
        field(
            "price_increase",
            "Food Price Increase Reported",
            ["72% of HH", "69% of HH", "70% of HH"],
        ),
    ];
    Section::new(
        "food",
        "Food Security Findings",
        "Food Security",
        "Food access is strained by prices and reduced income: 42% of households fall into poor/borderline Food Consumption Score (FCS) and most report recent stress coping (rCSI ≥4). Markets are operating—typically 5–6 days/week—but purchasing power is weak. Site patterns are consistent: in Rivne, acceptable/borderline/poor FCS stands at 57/29/14 with 72% reporting food price increases; Kovel shows 59/26/15 with 69% reporting increases; Lutsk 58/29/13 with 70% increases. rCSI ≥4 is common across sites (55–60%), suggesting reliance on less preferred food, borrowing, or meal size reduction. Priorities are to scale multipurpose cash for households with borderline/poor FCS and high rCSI, introduce value-capped e-vouchers where markets function (e.g., Rivne and Lutsk six days/week), and link highly vulnerable households to livelihoods or social protection referrals.",
    )
    .with_ai_recs([
        "Scale MPC to households with borderline/poor FCS and high rCSI.",
        "Introduce value-capped e-vouchers in sites with functioning markets.",
        "Coordinate with livelihoods actors on income-restoration activities.",
    ])
    .with_narrative_fields(codes(&fields))
    .with_rec_fields(codes(&fields))
    .with_chart(
        ChartKind::Bar,
        vec![
            ChartPoint::new("Acceptable", 58.0),
            ChartPoint::new("Borderline", 28.0),
            ChartPoint::new("Poor", 14.0),
        ],
    )
    .with_chart_labels(
        "Household Food Consumption Score (FCS)",
        Some("FCS category"),
        Some("% of households"),
    )
    .with_rows(site_rows(&fields))
}

fn shelter() -> Section {
    let fields = [
        field(
            "house_damage",
            "Housing Condition",
            [
                "adequate 60% | repairable 23% | severe/collective 17%",
                "adequate 62% | repairable 22% | severe/collective 16%",
                "adequate 59% | repairable 24% | severe/collective 17%",
            ],
        ),
        field("overcrowding", "Overcrowding (>3/room)", ["17% of HH", "15% of HH", "18% of HH"]),
        field("winter_need", "Winterization Gap", ["41% of HH", "39% of HH", "42% of HH"]),
    ];
    Section::new(
        "shelter",
        "Shelter & NFI Findings",
        "Shelter/NFI",
        "Housing damage and overcrowding remain salient: 23% of households report repairable damage and 17% live in overcrowded conditions (>3 persons/room). Winterization gaps persist, with 41% lacking sufficient heating items. Site patterns suggest concentrated needs: Rivne reports 41% with winter gaps and 17% overcrowding; Kovel 39% and 15%; Lutsk 42% and 18%, indicating the highest current winterization need in Lutsk. Given that 17% of households fall into severe/collective accommodation or face major constraints, rapid minor repairs (sealing kits, basic materials) can lift adequacy for a meaningful share. Priorities include repair kits for households with repairable damage, winter top-ups (blankets, heaters) for elderly and single-headed households, and light insulation of corridors/common areas in collective sites.",
    )
    .with_ai_recs([
        "Distribute sealing/repair kits to households with repairable damage.",
        "Provide winter top-ups (blankets, heaters) for vulnerable HHs.",
        "Community-level insulation of collective corridors/common areas.",
    ])
    .with_narrative_fields(codes(&fields))
    .with_rec_fields(codes(&fields))
    .with_chart(
        ChartKind::Pie,
        vec![
            ChartPoint::new("Adequate", 60.0),
            ChartPoint::new("Damaged (repairable)", 23.0),
            ChartPoint::new("Severe/Collective", 17.0),
        ],
    )
    .with_chart_labels("Housing Condition (Households)", None, None)
    .with_rows(site_rows(&fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_sections_in_display_order() {
        let ids: Vec<_> = initial_sections().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["overview", "wash", "health", "protection", "food", "shelter"]);
    }

    #[test]
    fn overview_has_no_recommendations() {
        let sections = initial_sections();
        let overview = &sections[0];
        assert!(!overview.has_recs);
        assert!(overview.ai_recs.is_empty());
        assert!(overview.rec_fields.is_empty());
    }

    #[test]
    fn wash_narrative_references_main_source() {
        let sections = initial_sections();
        let wash = sections.iter().find(|s| s.id == "wash").unwrap();
        assert_eq!(wash.narrative_fields[0], "w_source_main");
        assert_eq!(wash.chart, ChartKind::Bar);
    }

    #[test]
    fn every_field_observed_once_per_site() {
        for section in initial_sections() {
            let fields = section.focus_codes();
            assert_eq!(section.context_rows.len(), fields.len() * DEMO_SITES.len(), "{}", section.id);
            for code in fields {
                let n = section.context_rows.iter().filter(|r| r.code == code).count();
                assert_eq!(n, DEMO_SITES.len(), "{}:{code}", section.id);
            }
        }
    }

    #[test]
    fn rows_are_site_major() {
        let sections = initial_sections();
        let rows = &sections[0].context_rows;
        assert_eq!(rows[0].site.as_deref(), Some("Rivne"));
        assert_eq!(rows[0].code, "loc_hromada");
        assert_eq!(rows[3].site.as_deref(), Some("Kovel"));
        assert_eq!(rows[1].value, ContextValue::from(312));
    }

    #[test]
    fn seeded_unreviewed() {
        for section in initial_sections() {
            assert!(!section.is_reviewed(), "{}", section.id);
            assert_eq!(section.rating(), 0.0);
        }
    }
}
