mod common;

use common::{assert_close, exceeding, reading};
use std::io::Cursor;
use strandcut::config::AnalysisConfig;
use strandcut::measurement::Measurement;
use strandcut::slippage::io::readings_from_csv;
use strandcut::slippage::{compute, StrandEnd};
use strandcut::strands::{Layer, StrandId};
use strandcut::StrandCutError;

use StrandEnd::{E1, E2};

#[test]
fn test_single_strand_with_exceeding_end() {
    let readings = vec![reading("B1", E1, "0.5"), exceeding("B1", E2)];
    let stats = compute(&readings, &AnalysisConfig::default()).unwrap();

    let b1 = stats.strand(&StrandId::bottom(1)).unwrap();
    assert_eq!(b1.end1, Some(Measurement::Known(0.5)));
    assert_eq!(b1.end2, Some(Measurement::ExceedsThreshold(1.0)));
    assert_close(b1.total_in, 1.5);
    assert!(b1.exceeds);
    assert_eq!(b1.display_total(), ">1.500\"");

    assert!(!stats.end1.combined.exceeds);
    assert!(stats.end2.combined.exceeds);
    assert!(stats.grand.combined.exceeds);
}

#[test]
fn test_empty_readings_yield_zeros() {
    let stats = compute(&[], &AnalysisConfig::default()).unwrap();
    for scope in [&stats.end1, &stats.end2, &stats.grand] {
        assert_eq!(scope.combined.count, 0);
        assert_eq!(scope.combined.total_in, 0.0);
        assert_eq!(scope.combined.average_in, 0.0);
        assert!(!scope.combined.average_in.is_nan());
    }
    assert!(stats.strands.is_empty());
}

#[test]
fn test_duplicate_reading_is_rejected() {
    let readings = vec![reading("B2", E1, "0.5"), reading("b2", E1, "0.25")];
    let err = compute(&readings, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, StrandCutError::DuplicateReading { .. }));
}

#[test]
fn test_average_divides_by_readings_present() {
    let readings = vec![
        reading("B1", E1, "0.25"),
        reading("B2", E1, "0.5"),
        reading("B3", E1, ""),
    ];
    let stats = compute(&readings, &AnalysisConfig::default()).unwrap();

    assert_close(stats.end1.combined.total_in, 0.75);
    assert_eq!(stats.end1.combined.count, 3);
    assert_close(stats.end1.combined.average_in, 0.25);
    assert!(stats.invalid_entries.is_empty());
}

#[test]
fn test_sentinel_reaches_every_containing_scope() {
    let readings = vec![
        reading("B1", E1, "0.125"),
        reading("B1", E2, "0.125"),
        exceeding("T1", E1),
    ];
    let stats = compute(&readings, &AnalysisConfig::default()).unwrap();

    assert!(stats.end1.top.exceeds);
    assert!(stats.end1.combined.exceeds);
    assert!(stats.grand.top.exceeds);
    assert!(stats.grand.combined.exceeds);

    assert!(!stats.end1.bottom.exceeds);
    assert!(!stats.end2.combined.exceeds);
    assert!(!stats.grand.layer(Layer::Bottom).exceeds);
    assert!(!stats.strand(&StrandId::bottom(1)).unwrap().exceeds);

    assert_close(stats.grand.combined.total_in, 1.25);
    assert_eq!(stats.grand.combined.display_total(), ">1.250\"");
}

#[test]
fn test_threshold_is_configurable() {
    let config = AnalysisConfig {
        exceeds_threshold_in: 0.75,
        ..AnalysisConfig::default()
    };
    let stats = compute(&[exceeding("B1", E1)], &config).unwrap();
    assert_close(stats.grand.combined.total_in, 0.75);
}

#[test]
fn test_missing_readings() {
    let readings = vec![reading("B1", E1, "0.5"), reading("B1", E2, "0.5")];
    let stats = compute(&readings, &AnalysisConfig::default()).unwrap();

    let missing = stats.missing(&[StrandId::bottom(1), StrandId::bottom(2)]);
    assert_eq!(
        missing,
        vec![(StrandId::bottom(2), E1), (StrandId::bottom(2), E2)]
    );
}

#[test]
fn test_csv_import_feeds_statistics() {
    let data = "strand,end,value,exceeds\n\
                B1,E1,1/4,\n\
                B1,e2,,yes\n\
                T1,E1,0.5,no\n";
    let readings = readings_from_csv(Cursor::new(data)).unwrap();
    assert_eq!(readings.len(), 3);

    let stats = compute(&readings, &AnalysisConfig::default()).unwrap();
    assert_close(stats.grand.bottom.total_in, 1.25);
    assert!(stats.grand.bottom.exceeds);
    assert_close(stats.grand.top.total_in, 0.5);
    assert!(!stats.grand.top.exceeds);
}

#[test]
fn test_csv_rows_may_drop_trailing_cells() {
    let data = "strand,end,value,exceeds\n\
                B1,E1\n\
                B2,E2,0.5\n";
    let readings = readings_from_csv(Cursor::new(data)).unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].raw_text, "");
    assert!(!readings[0].exceeds_one);
    assert_eq!(readings[1].raw_text, "0.5");
    assert!(!readings[1].exceeds_one);

    let stats = compute(&readings, &AnalysisConfig::default()).unwrap();
    assert_eq!(stats.grand.combined.count, 2);
    assert_close(stats.grand.combined.total_in, 0.5);
}

#[test]
fn test_csv_row_without_end_is_a_validation_error() {
    let data = "strand,end,value,exceeds\nB1\n";
    let err = readings_from_csv(Cursor::new(data)).unwrap_err();
    assert!(matches!(err, StrandCutError::Validation(_)));
}
