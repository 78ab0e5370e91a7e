//! Integration tests for the grouped statistics tool.
//!
//! These tests load CSV fixtures from disk and check the full analysis,
//! the rendered console output and the written JSON report.

use lex_stats::reporting::{ConsoleRenderer, JsonRenderer, RenderOptions, render_report};
use lex_stats::{
    AnalysisConfig, AnalysisReport, ColumnType, GroupKey, ReportGenerator, StatsError,
    analyze_file, load_csv,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn analyze_fixture(filename: &str, config: &AnalysisConfig) -> AnalysisReport {
    analyze_file(fixtures_path().join(filename), config).expect("Failed to analyze fixture")
}

fn key(values: &[&str]) -> GroupKey {
    values.iter().copied().collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_ads_sample() {
    let dataset = load_csv(fixtures_path().join("ads_sample.csv")).unwrap();

    assert_eq!(dataset.height(), 10);
    assert_eq!(
        dataset.columns,
        vec!["page_id", "ad_id", "page_name", "spend", "impressions", "region", "notes"]
    );
    assert_eq!(dataset.rows[5].get("page_name"), Some("Gamma, Inc."));
    assert_eq!(dataset.rows[5].get("spend"), Some(""));
    assert_eq!(dataset.rows[8].get("spend"), Some("n/a"));
}

#[test]
fn test_missing_fixture_is_input_error() {
    let err = analyze_file(
        fixtures_path().join("does_not_exist.csv"),
        &AnalysisConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, StatsError::CsvLoadFailed { .. }));
    assert!(err.is_input_error());
}

// ============================================================================
// Overall Statistics
// ============================================================================

#[test]
fn test_overall_classification() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    assert_eq!(report.row_count, 10);
    assert_eq!(report.column_count, 7);
    assert_eq!(report.column_types["spend"], ColumnType::Numeric);
    assert_eq!(report.column_types["impressions"], ColumnType::Numeric);
    assert_eq!(report.column_types["page_id"], ColumnType::Categorical);
    assert_eq!(report.column_types["notes"], ColumnType::Categorical);
    assert_eq!(report.numeric_columns, 2);
    assert_eq!(report.categorical_columns, 5);
}

#[test]
fn test_overall_numeric_column() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    let impressions = &report.overall["impressions"];
    assert_eq!(impressions.count, 10);
    assert_eq!(impressions.non_empty_count, 9);

    let summary = impressions.numeric().expect("numeric impressions");
    assert_eq!(summary.min, 300.0);
    assert_eq!(summary.max, 2000.0);
    assert_eq!(summary.median, 900.0);
    assert_eq!(summary.q1, 700.0);
    assert_eq!(summary.q3, 1200.0);
    assert!((summary.mean - 8900.0 / 9.0).abs() < 1e-9);
}

#[test]
fn test_overall_numeric_fallback() {
    // classified numeric (8 of 9), but "n/a" cannot be parsed
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    let spend = &report.overall["spend"];
    assert!(spend.numeric().is_none());
    let summary = spend.categorical().expect("categorical fallback");
    assert_eq!(summary.most_common[0].value, "100");
    assert_eq!(summary.most_common[0].frequency, 2);
}

#[test]
fn test_overall_categorical_column() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    let region = report.overall["region"].categorical().unwrap();
    assert_eq!(region.unique_count, 4);

    let most: Vec<(&str, usize)> = region
        .most_common
        .iter()
        .map(|v| (v.value.as_str(), v.frequency))
        .collect();
    assert_eq!(most, vec![("north", 4), ("south", 2), ("east", 2)]);

    let least: Vec<(&str, usize)> = region
        .least_common
        .iter()
        .map(|v| (v.value.as_str(), v.frequency))
        .collect();
    assert_eq!(least, vec![("south", 2), ("east", 2), ("west", 1)]);
}

#[test]
fn test_missing_values_summary() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    let missing: Vec<(&str, usize)> = report
        .missing_values
        .iter()
        .map(|m| (m.column.as_str(), m.missing_count))
        .collect();
    assert_eq!(
        missing,
        vec![("notes", 9), ("spend", 1), ("impressions", 1), ("region", 1)]
    );
    assert_eq!(report.missing_values[0].missing_percentage, 90.0);
}

#[test]
fn test_overall_correlations() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    // spend still correlates on the 7 rows where both cells parse, even though
    // its overall record falls back to categorical
    assert_eq!(report.correlations.len(), 1);
    let pair = &report.correlations[0];
    assert_eq!((pair.left.as_str(), pair.right.as_str()), ("spend", "impressions"));
    assert_eq!(pair.paired_rows, 7);
    assert!((pair.coefficient.unwrap() - 0.9677675723406287).abs() < 1e-9);
    assert_eq!(report.high_correlations, report.correlations);
}

// ============================================================================
// Groupings
// ============================================================================

#[test]
fn test_page_grouping() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());
    let by_page = &report.groupings[0];

    assert_eq!(by_page.keys, vec!["page_id"]);
    assert_eq!(by_page.group_count, 4);

    let order: Vec<(&GroupKey, usize)> =
        by_page.groups.iter().map(|g| (&g.key, g.row_count)).collect();
    assert_eq!(
        order,
        vec![
            (&key(&["P1"]), 5),
            (&key(&["P2"]), 3),
            (&key(&["P3"]), 1),
            (&key(&["P4"]), 1),
        ]
    );

    let sizes = by_page.group_size_summary.as_ref().unwrap();
    assert_eq!(sizes.mean, 2.5);
    assert_eq!(sizes.median, 2.0);
    assert_eq!(sizes.max, 5.0);
}

#[test]
fn test_group_statistics_use_dataset_types() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());
    let groups = &report.groupings[0].groups;

    // P1 spend parses fully, so the numeric label applies
    let p1_spend = groups[0].statistics["spend"].numeric().expect("numeric P1 spend");
    assert_eq!(p1_spend.mean, 160.0);
    assert_eq!(p1_spend.median, 150.0);
    assert_eq!(p1_spend.mode.value, 100.0);
    assert_eq!(p1_spend.mode.frequency, 2);

    // P4 only has "n/a"
    assert!(groups[3].statistics["spend"].categorical().is_some());

    // P3 spend is empty: counts only
    let p3_spend = &groups[2].statistics["spend"];
    assert_eq!(p3_spend.non_empty_count, 0);
    assert!(p3_spend.summary.is_none());
}

#[test]
fn test_page_ad_grouping() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());
    let by_page_ad = &report.groupings[1];

    assert_eq!(by_page_ad.keys, vec!["page_id", "ad_id"]);
    assert_eq!(by_page_ad.group_count, 6);

    let largest: Vec<(String, usize)> = by_page_ad
        .largest_groups
        .iter()
        .take(3)
        .map(|g| (g.key.to_string(), g.rows))
        .collect();
    assert_eq!(
        largest,
        vec![
            ("P1, A1".to_string(), 3),
            ("P1, A2".to_string(), 2),
            ("P2, A3".to_string(), 2),
        ]
    );
}

#[test]
fn test_missing_grouping_columns_are_skipped() {
    let report = analyze_fixture("pages_only.csv", &AnalysisConfig::default());

    assert_eq!(report.groupings.len(), 1);
    assert_eq!(report.skipped_groupings.len(), 1);
    assert_eq!(report.skipped_groupings[0].missing_columns, vec!["ad_id"]);
}

#[test]
fn test_custom_grouping_and_detail_limit() {
    let config = AnalysisConfig::builder()
        .grouping(["region"])
        .max_detailed_groups(2)
        .largest_groups_limit(1)
        .build()
        .unwrap();
    let report = analyze_fixture("ads_sample.csv", &config);

    assert_eq!(report.groupings.len(), 1);
    let by_region = &report.groupings[0];
    // north, south, east, west and the empty value
    assert_eq!(by_region.group_count, 5);
    assert_eq!(by_region.groups.len(), 2);
    assert_eq!(by_region.undetailed_groups, 3);
    assert_eq!(by_region.largest_groups.len(), 1);
    assert_eq!(by_region.largest_groups[0].key, key(&["north"]));
}

#[test]
fn test_sequential_and_parallel_agree() {
    let parallel = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());
    let sequential = analyze_fixture(
        "ads_sample.csv",
        &AnalysisConfig::builder().parallel(false).build().unwrap(),
    );

    assert_eq!(parallel.overall, sequential.overall);
    assert_eq!(parallel.groupings, sequential.groupings);
}

// ============================================================================
// Rendering and Report Output
// ============================================================================

#[test]
fn test_console_rendering() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());

    let mut console = ConsoleRenderer::new(Vec::new());
    render_report(&mut console, &report, &RenderOptions::default()).unwrap();
    let output = String::from_utf8(console.into_inner()).unwrap();

    assert!(output.contains("OVERALL DATASET STATISTICS"));
    assert!(output.contains("Found 4 unique page_id groups"));
    assert!(output.contains("Found 6 unique (page_id, ad_id) combinations"));
    assert!(output.contains("PAGE_ID = P1 (5 rows)"));
    assert!(output.contains("PAGE_ID = P1, AD_ID = A1 (3 rows)"));
    // only the first three groups of each grouping are shown
    assert!(!output.contains("PAGE_ID = P4 (1 rows)"));
    assert!(output.contains("... (showing first 5 items)"));
    assert!(output.contains("  mode: 100 (appears 2 times)"));
    assert!(output.contains("High correlation: spend ~ impressions (r = 0.968, 7 rows)"));
}

#[test]
fn test_json_rendering_matches_sections() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());
    let options = RenderOptions {
        max_groups_displayed: 1,
        ..RenderOptions::default()
    };

    let mut renderer = JsonRenderer::new();
    render_report(&mut renderer, &report, &options).unwrap();

    let titles: Vec<&str> = renderer.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "OVERALL DATASET STATISTICS",
            "PAGE_ID = P1 (5 rows)",
            "PAGE_ID = P1, AD_ID = A1 (3 rows)",
        ]
    );
    assert_eq!(renderer.sections[0].statistics.len(), 7);
    assert_eq!(renderer.sections[1].statistics.len(), 5);
    assert_eq!(renderer.sections[1].omitted_columns, 2);
}

#[test]
fn test_emit_report_file() {
    let report = analyze_fixture("ads_sample.csv", &AnalysisConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let path = ReportGenerator::new(dir.path())
        .write_report_to_file(&report, "ads_sample")
        .unwrap();

    assert!(path.ends_with("ads_sample_stats.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["row_count"], 10);
    assert_eq!(json["groupings"][0]["group_count"], 4);
    assert_eq!(json["overall"]["impressions"]["summary"]["kind"], "numeric");
    assert_eq!(json["overall"]["spend"]["summary"]["kind"], "categorical");
    assert_eq!(json["high_correlations"][0]["paired_rows"], 7);
}
