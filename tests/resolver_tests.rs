mod common;

use common::{field_pattern, two_layer_pattern, PatternBuilder};
use rstest::rstest;
use std::collections::BTreeSet;
use strandcut::catalog::ProductCatalog;
use strandcut::config::AnalysisConfig;
use strandcut::cut::{CutSpec, KeeperSide};
use std::io::Write;
use strandcut::strands::{
    check_full_width, resolve_active, summarize, ActiveStrands, DiameterClass,
    InMemoryPatternRepository, Layer, PatternRepository, StrandId, StrandPattern,
};
use tempfile::NamedTempFile;
use strandcut::StrandCutError;

fn active_bottom(active: &ActiveStrands, pattern: &StrandPattern) -> Vec<u32> {
    let config = AnalysisConfig::default();
    active.positions(Layer::Bottom, &pattern.slots(config.layer_split_min_gap_in))
}

#[test]
fn test_uncut_is_all_active() {
    let active = resolve_active(&field_pattern(), None, &AnalysisConfig::default()).unwrap();
    assert_eq!(active, ActiveStrands::All);
}

#[rstest]
#[case(KeeperSide::L1, 24.0, vec![1, 2, 3])]
#[case(KeeperSide::L2, 24.0, vec![4, 5, 6])]
#[case(KeeperSide::L1, 10.78, vec![1, 2])] // inclusive edge
#[case(KeeperSide::L2, 2.0, vec![6])] // 48.625 - 2.0 = 46.625, inclusive
#[case(KeeperSide::L1, 1.0, vec![])]
fn test_field_pattern_cuts(#[case] side: KeeperSide, #[case] width: f64, #[case] expected: Vec<u32>) {
    let pattern = field_pattern();
    let cut = CutSpec::new(width, side).unwrap();
    let active = resolve_active(&pattern, Some(&cut), &AnalysisConfig::default()).unwrap();
    assert_eq!(active_bottom(&active, &pattern), expected);
}

#[rstest]
#[case(KeeperSide::L1)]
#[case(KeeperSide::L2)]
fn test_cut_at_full_width_keeps_everything(#[case] side: KeeperSide) {
    let pattern = field_pattern();
    let config = AnalysisConfig::default();
    let full = pattern.derived_full_width(config.concrete_cover_in);
    assert_eq!(full, 48.625);

    let cut = CutSpec::new(full, side).unwrap();
    let active = resolve_active(&pattern, Some(&cut), &config).unwrap();
    assert_eq!(active_bottom(&active, &pattern), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_zero_cut_keeps_only_edge_strands() {
    let config = AnalysisConfig::default();
    let cut = CutSpec::new(0.0, KeeperSide::L1).unwrap();

    let edge = PatternBuilder::new("edge")
        .bottom(&[0.0, 5.0, 10.0])
        .build();
    let active = resolve_active(&edge, Some(&cut), &config).unwrap();
    assert_eq!(active_bottom(&active, &edge), vec![1]);

    let active = resolve_active(&field_pattern(), Some(&cut), &config).unwrap();
    assert_eq!(active, ActiveStrands::Only(BTreeSet::new()));
}

#[test]
fn test_cut_wider_than_derived_width_is_rejected() {
    let cut = CutSpec::new(48.7, KeeperSide::L2).unwrap();
    let err = resolve_active(&field_pattern(), Some(&cut), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, StrandCutError::InvalidCutSpec(_)));
}

// Top strands ignore the cut. Pinned as observed in the field tool; awaiting
// product-owner confirmation before changing.
#[test]
fn test_top_strands_always_active() {
    let pattern = two_layer_pattern();
    let cut = CutSpec::new(10.0, KeeperSide::L1).unwrap();
    let active = resolve_active(&pattern, Some(&cut), &AnalysisConfig::default()).unwrap();

    let expected: BTreeSet<StrandId> = [StrandId::bottom(1), StrandId::top(1), StrandId::top(2)]
        .into_iter()
        .collect();
    assert_eq!(active, ActiveStrands::Only(expected));
}

#[test]
fn test_layer_split_respects_min_gap() {
    let pattern = two_layer_pattern();
    let mut config = AnalysisConfig::default();
    config.layer_split_min_gap_in = 5.0;

    let slots = pattern.slots(config.layer_split_min_gap_in);
    assert!(slots.iter().all(|s| s.id.layer == Layer::Bottom));
    assert_eq!(slots.last().unwrap().id, StrandId::bottom(8));
}

#[test]
fn test_width_mismatch_is_a_warning_only() {
    let catalog = ProductCatalog::standard();
    let hc8 = catalog.lookup("hc8").unwrap();
    let config = AnalysisConfig::default();

    let mismatch = check_full_width(&field_pattern(), hc8, &config).unwrap();
    assert_eq!(mismatch.derived_width_in, 48.625);
    assert_eq!(mismatch.catalog_width_in, 48.0);

    assert!(check_full_width(&two_layer_pattern(), hc8, &config).is_none());

    // Resolution still succeeds for the mismatched pattern.
    let cut = CutSpec::new(24.0, KeeperSide::L1).unwrap();
    assert!(resolve_active(&field_pattern(), Some(&cut), &config).is_ok());
}

#[test]
fn test_summary_counts_per_class() {
    let pattern = two_layer_pattern();
    let config = AnalysisConfig::default();
    let cut = CutSpec::new(24.0, KeeperSide::L1).unwrap();
    let active = resolve_active(&pattern, Some(&cut), &config).unwrap();
    let summary = summarize(&pattern.slots(config.layer_split_min_gap_in), &active);

    assert_eq!(summary.total, 8);
    assert_eq!(summary.active, 5);

    let half = summary
        .by_class
        .iter()
        .find(|c| c.class == Some(DiameterClass::OneHalf))
        .unwrap();
    assert_eq!((half.total, half.active), (6, 3));

    let three_eighths = summary
        .by_class
        .iter()
        .find(|c| c.class == Some(DiameterClass::ThreeEighths))
        .unwrap();
    assert_eq!((three_eighths.total, three_eighths.active), (2, 2));
}

#[test]
fn test_mismatched_diameter_list_is_invalid() {
    let mut pattern = field_pattern();
    pattern.diameters.pop();
    let err = resolve_active(&pattern, None, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, StrandCutError::InvalidPattern { .. }));
}

#[test]
fn test_cut_from_form_fields() {
    assert!(CutSpec::from_form(None, None).unwrap().is_none());
    let cut = CutSpec::from_form(Some(24.0), Some(KeeperSide::L1))
        .unwrap()
        .unwrap();
    assert_eq!(cut.cut_width_in, 24.0);
    assert!(CutSpec::from_form(Some(24.0), None).is_err());
}

#[test]
fn test_repository_lookup() {
    let repo = InMemoryPatternRepository::new(vec![field_pattern(), two_layer_pattern()]).unwrap();
    assert_eq!(repo.get("hc8-6b2t").unwrap().len(), 8);

    let err = repo.get("nope").unwrap_err();
    assert!(matches!(err, StrandCutError::UnknownPattern(_)));
}

#[test]
fn test_repository_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&vec![two_layer_pattern()]).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let repo = InMemoryPatternRepository::load_from_file(file.path()).unwrap();
    let pattern = repo.get("hc8-6b2t").unwrap();
    assert_eq!(pattern.required_force_lbs, Some(85_000.0));
    assert_eq!(pattern.counts.total(), 8);
}

#[rstest]
#[case(r#"{ "cut_width_in": -5.0, "keeper_side": "L1" }"#)]
#[case(r#"{ "cut_width_in": -0.5, "keeper_side": "L2" }"#)]
fn test_deserialized_negative_cut_is_rejected(#[case] json: &str) {
    let cut: CutSpec = serde_json::from_str(json).unwrap();
    let err = resolve_active(&field_pattern(), Some(&cut), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, StrandCutError::InvalidCutSpec(_)));
}

#[test]
fn test_non_finite_cut_is_rejected() {
    let cut = CutSpec {
        cut_width_in: f64::NAN,
        keeper_side: KeeperSide::L2,
    };
    let err = resolve_active(&field_pattern(), Some(&cut), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, StrandCutError::InvalidCutSpec(_)));
}
