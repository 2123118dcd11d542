use rstest::rstest;
use strandcut::measurement::{
    classify, format_value, format_with_fraction, parse, parse_strict, to_fraction,
    to_fraction_with, EntryStatus, Measurement, MeasurementError,
};

#[rstest]
#[case("0.5", 0.5)]
#[case(".5", 0.5)]
#[case("1.", 1.0)]
#[case("3/8", 0.375)]
#[case("1 1/2", 1.5)]
#[case("1-1/2", 1.5)]
#[case("1/2\"", 0.5)]
#[case("0.25 in", 0.25)]
#[case("  0.75 inches ", 0.75)]
#[case("-0.125", -0.125)]
#[case("1 / 2", 0.5)]
#[case("1 1 / 2", 1.5)]
#[case(" 3 /8\"", 0.375)]
#[case("0", 0.0)]
fn test_parse_accepts_field_formats(#[case] text: &str, #[case] expected: f64) {
    assert_eq!(parse(text), Some(expected), "parsing '{}'", text);
}

#[rstest]
#[case("abc")]
#[case("1e3")]
#[case("1..5")]
#[case("/2")]
#[case("1/")]
#[case("-")]
fn test_parse_rejects_garbage(#[case] text: &str) {
    assert_eq!(parse(text), None);
    assert!(matches!(
        parse_strict(text),
        Err(MeasurementError::Unparseable(_))
    ));
}

#[test]
fn test_zero_denominator_is_its_own_error() {
    assert_eq!(parse("1/0"), None);
    assert!(matches!(
        parse_strict("1/0"),
        Err(MeasurementError::ZeroDenominator(_))
    ));
}

#[rstest]
#[case("", EntryStatus::Blank)]
#[case("   ", EntryStatus::Blank)]
#[case("0", EntryStatus::Valid)]
#[case("5/16", EntryStatus::Valid)]
#[case("n/a", EntryStatus::Invalid)]
fn test_classify(#[case] text: &str, #[case] expected: EntryStatus) {
    assert_eq!(classify(text), expected);
}

#[rstest]
#[case(0.5, "1/2")]
#[case(1.5, "1 1/2")]
#[case(0.0, "0")]
#[case(2.0, "2")]
#[case(0.1875, "3/16")]
#[case(0.97, "1")]
#[case(-0.25, "-1/4")]
#[case(1.0625, "1 1/16")]
#[case(0.01, "0")]
fn test_to_fraction(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(to_fraction(value), expected);
}

#[test]
fn test_to_fraction_coarser_denominator() {
    assert_eq!(to_fraction_with(0.1875, 8), "1/4");
    assert_eq!(to_fraction_with(0.3, 4), "1/4");
}

#[test]
fn test_display_contract() {
    assert_eq!(format_value(1.5, false), "1.500\"");
    assert_eq!(format_value(1.5, true), ">1.500\"");
    assert_eq!(format_with_fraction(1.5, true, 16), ">1.500\" (≈1 1/2\")");
}

#[test]
fn test_measurement_from_entry() {
    let m = Measurement::from_entry("0.3", true, 1.0);
    assert_eq!(m, Measurement::ExceedsThreshold(1.0));
    assert_eq!(m.display(), ">1.000\"");

    let m = Measurement::from_entry("garbage", false, 1.0);
    assert_eq!(m, Measurement::Known(0.0));
    assert!(!m.exceeds());

    assert_eq!(Measurement::from_entry("", false, 1.0).effective_value(), 0.0);
}
