//! Conversions between compact calendar stamps and epoch seconds.

use chrono::{TimeZone, Utc};
use tc_common::time::{
    compact_to_epoch, epoch_to_compact, format_compact, from_epoch, parse_compact,
    parse_compact_as, CompactFormat, TimeParseError,
};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_all_layouts_agree_on_the_hour() {
    let hour = parse_compact("2012082812").unwrap();
    let minute = parse_compact("201208281200").unwrap();
    let second = parse_compact("20120828120000").unwrap();
    assert_eq!(hour, minute);
    assert_eq!(minute, second);
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let dt = parse_compact(" 2012082812\n").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2012, 8, 28, 12, 0, 0).unwrap());
}

#[test]
fn test_layout_mismatch() {
    let err = parse_compact_as("2012082812", CompactFormat::Second).unwrap_err();
    assert!(matches!(err, TimeParseError::Malformed { .. }));
    assert!(err.to_string().contains("2012082812"));
}

#[test]
fn test_empty_string() {
    assert!(parse_compact("").is_err());
}

#[test]
fn test_leap_day() {
    assert!(parse_compact("2012022900").is_ok());
    assert!(parse_compact("2011022900").is_err());
}

// ============================================================================
// Epoch round trips
// ============================================================================

#[test]
fn test_known_epoch() {
    // 2005-08-01T00:00:00Z
    assert_eq!(compact_to_epoch("2005080100").unwrap(), 1_122_854_400);
}

#[test]
fn test_epoch_back_to_compact() {
    assert_eq!(
        epoch_to_compact(1_122_854_400, CompactFormat::Minute).unwrap(),
        "200508010000"
    );
}

#[test]
fn test_out_of_range_epoch() {
    assert!(matches!(
        from_epoch(i64::MAX),
        Err(TimeParseError::OutOfRange(_))
    ));
}

#[test]
fn test_format_compact_widths() {
    let dt = parse_compact("20060912033015").unwrap();
    for format in [CompactFormat::Hour, CompactFormat::Minute, CompactFormat::Second] {
        assert_eq!(format_compact(&dt, format).len(), format.width());
    }
}
