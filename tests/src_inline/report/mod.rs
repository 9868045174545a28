use super::*;

#[test]
fn test_round_to_four_decimals() {
    assert_eq!(round_to(2.0 / 3.0, 4), 0.6667);
    assert_eq!(round_to(0.6, 4), 0.6);
    assert_eq!(round_to(-0.123449, 4), -0.1234);
    assert_eq!(round_opt(None, 4), None);
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_score(None), "N/A");
    assert_eq!(format_score(Some(0.5)), "0.5000");
    assert_eq!(format_percent(0.6), "60.00%");
    assert_eq!(format_percent_opt(None), "N/A");
}
