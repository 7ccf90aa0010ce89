use shoptools_core::measurement::*;
use shoptools_core::units::format_decimal;

#[test]
fn test_quote_units_normalise() {
    let measurements = parse_measurements("2' 6\"", "in");
    assert_eq!(
        measurements,
        vec![Measurement::new("2", "ft"), Measurement::new("6", "in")]
    );
    assert_eq!(sum_as_inches(&measurements), 30.0);
}

#[test]
fn test_fraction_handling() {
    assert_eq!(measurement_to_inches("3/8", "in"), 0.375);
    assert_eq!(measurement_to_inches("1 3/8", "in"), 1.375);
    assert_eq!(measurement_to_inches("1 3/0", "in"), 1.0);
}

#[test]
fn test_mixed_units_sum() {
    // 1ft = 304.8mm
    let total = measurement_to_mm("1ft 10mm", "mm");
    assert!((total - 314.8).abs() < 1e-9);

    let total = measurement_to_inches("25.4mm 1in", "mm");
    assert!((total - 2.0).abs() < 1e-9);
}

#[test]
fn test_malformed_text_never_fails() {
    assert_eq!(measurement_to_mm("", "mm"), 0.0);
    assert_eq!(measurement_to_mm("abc", "mm"), 0.0);
    assert_eq!(measurement_to_mm("5 bogus", "mm"), 0.0);
    assert_eq!(measurement_to_mm("5mm bogus", "mm"), 5.0);
}

#[test]
fn test_round_trip_is_stable() {
    for text in ["12", "12.5", "0.125", "300", "7.75"] {
        let first = measurement_to_mm(text, "mm");
        let reformatted = format!("{}mm", format_decimal(first));
        let second = measurement_to_mm(&reformatted, "mm");
        assert_eq!(first, second, "round trip of '{}'", text);
    }
}

#[test]
fn test_default_unit_inherited() {
    let measurements = parse_measurements("2cm 5 3/8", "in");
    assert_eq!(
        measurements,
        vec![Measurement::new("2", "cm"), Measurement::new("5 3/8", "in")]
    );
}
