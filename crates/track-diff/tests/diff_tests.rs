//! Differencing synthetic tracks.

use tc_common::time::parse_compact;
use tc_common::{great_circle_km, TrackAttribute};
use test_utils::{assert_approx_eq, LinearStorm};
use track_diff::{compute_diff, Alignment, DiffOptions, SkipReason};

const HOURS: [i64; 5] = [0, 6, 12, 18, 24];

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_track_against_itself_is_zero() {
    let start = parse_compact("2012082600").unwrap();
    let track = LinearStorm::default().track(start, &HOURS);

    for alignment in [Alignment::ValidTime, Alignment::ForecastHour] {
        let options = DiffOptions {
            alignment,
            ..Default::default()
        };
        let diff = compute_diff(&track, &track, &options);
        assert_eq!(diff.len(), HOURS.len());
        assert!(diff.skipped().is_empty());
        for entry in &diff {
            assert_eq!(entry.track_error_km, 0.0);
            assert_eq!(entry.pressure_error_mb, 0.0);
            assert_eq!(entry.wind_error_kts, 0.0);
        }
    }
}

#[test]
fn test_great_circle_is_symmetric() {
    let ab = great_circle_km(23.0, -78.0, 25.5, -82.25);
    let ba = great_circle_km(25.5, -82.25, 23.0, -78.0);
    assert_eq!(ab, ba);
    assert_eq!(great_circle_km(25.5, -82.25, 25.5, -82.25), 0.0);
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn test_forecast_hour_alignment_ignores_reference_offset() {
    let storm = LinearStorm::default();
    let a = storm.track(parse_compact("2012082600").unwrap(), &HOURS);
    let b = storm.track(parse_compact("2012082612").unwrap(), &HOURS);

    let options = DiffOptions {
        alignment: Alignment::ForecastHour,
        ..Default::default()
    };
    let diff = compute_diff(&a, &b, &options);
    assert_eq!(diff.len(), HOURS.len());
    assert!(diff.iter().all(|e| e.track_error_km == 0.0));
    assert!(diff.iter().all(|e| e.pressure_error_mb == 0.0));
}

#[test]
fn test_valid_time_alignment_pairs_same_instant() {
    let storm = LinearStorm::default();
    let a = storm.track(parse_compact("2012082600").unwrap(), &HOURS);
    let b = storm.track(parse_compact("2012082612").unwrap(), &HOURS);

    let diff = compute_diff(&a, &b, &DiffOptions::default());
    let paired: Vec<Option<i64>> = diff.iter().map(|e| e.forecast_hour).collect();
    assert_eq!(paired, vec![Some(12), Some(18), Some(24)]);

    // a at +12h against b at its analysis time
    let first = &diff.entries()[0];
    assert_approx_eq!(first.pressure_error_mb, -6.0, 1e-9);
    assert_approx_eq!(first.wind_error_kts, 12.0, 1e-9);
    assert!(first.track_error_km > 0.0);

    assert_eq!(diff.skipped().len(), 2);
    assert!(diff
        .skipped()
        .iter()
        .all(|s| s.reason == SkipReason::MissingCorrespondingEntry));
}

#[test]
fn test_forecast_hour_and_valid_time_come_from_first_track() {
    let storm = LinearStorm::default();
    let a_start = parse_compact("2012082600").unwrap();
    let a = storm.track(a_start, &HOURS);
    let b = storm.track(parse_compact("2012082612").unwrap(), &HOURS);

    let options = DiffOptions {
        alignment: Alignment::ForecastHour,
        ..Default::default()
    };
    let diff = compute_diff(&a, &b, &options);
    assert_eq!(diff.reference_time(), Some(a_start));
    assert_eq!(diff.entries()[1].valid_time, parse_compact("2012082606").unwrap());
}

// ============================================================================
// Flags and operators
// ============================================================================

#[test]
fn test_flagged_pairs_are_marked_by_default() {
    let start = parse_compact("2012082600").unwrap();
    let storm = LinearStorm::default();
    let a = storm.track_with_flags(start, &HOURS, &[6]);
    let b = storm.track_with_flags(start, &HOURS, &[18]);

    let diff = compute_diff(&a, &b, &DiffOptions::default());
    assert_eq!(diff.len(), HOURS.len());
    let flags: Vec<bool> = diff.iter().map(|e| e.flagged).collect();
    assert_eq!(flags, vec![false, true, false, true, false]);
}

#[test]
fn test_flagged_pairs_can_be_excluded() {
    let start = parse_compact("2012082600").unwrap();
    let storm = LinearStorm::default();
    let a = storm.track_with_flags(start, &HOURS, &[6]);
    let b = storm.track_with_flags(start, &HOURS, &[18]);

    let options = DiffOptions {
        include_flagged: false,
        ..Default::default()
    };
    let diff = compute_diff(&a, &b, &options);
    assert_eq!(diff.len(), 3);
    assert!(diff.iter().all(|e| !e.flagged));
    assert_eq!(diff.skipped().len(), 2);
    assert!(diff.skipped().iter().all(|s| s.reason == SkipReason::Flagged));
}

#[test]
fn test_absolute_errors() {
    let storm = LinearStorm::default();
    let start = parse_compact("2012082600").unwrap();
    let a = storm.track(start, &HOURS);
    let stronger = LinearStorm {
        mslp: 1000.0,
        max_wind: 40.0,
        ..storm
    }
    .track(start, &HOURS);

    let signed = compute_diff(&a, &stronger, &DiffOptions::default());
    assert!(signed.iter().all(|e| e.pressure_error_mb == -5.0));
    assert!(signed.iter().all(|e| e.wind_error_kts == 15.0));

    let options = DiffOptions {
        absolute: true,
        ..Default::default()
    };
    let absolute = compute_diff(&a, &stronger, &options);
    assert!(absolute.iter().all(|e| e.pressure_error_mb == 5.0));
    assert!(absolute.iter().all(|e| e.wind_error_kts == 15.0));
}

#[test]
fn test_custom_operator() {
    fn ratio(a: f64, b: f64) -> f64 {
        a / b
    }

    let start = parse_compact("2012082600").unwrap();
    let a = LinearStorm {
        max_wind: 100.0,
        trend: (0.0, 0.0),
        ..Default::default()
    }
    .track(start, &HOURS);
    let b = LinearStorm {
        max_wind: 50.0,
        trend: (0.0, 0.0),
        ..Default::default()
    }
    .track(start, &HOURS);

    let options = DiffOptions {
        combine: ratio,
        ..Default::default()
    };
    let diff = compute_diff(&a, &b, &options);
    assert!(diff.iter().all(|e| e.wind_error_kts == 2.0));
    assert!(diff.iter().all(|e| e.pressure_error_mb == 1.0));
}

// ============================================================================
// Summary and export
// ============================================================================

#[test]
fn test_summary() {
    let storm = LinearStorm::default();
    let start = parse_compact("2012082600").unwrap();
    let a = storm.track_with_flags(start, &HOURS, &[24]);
    let b = LinearStorm {
        lat: storm.lat + 1.0,
        ..storm
    }
    .track(start, &HOURS[..4]);

    let summary = compute_diff(&a, &b, &DiffOptions::default()).summary();
    assert_eq!(summary.compared, 4);
    assert_eq!(summary.flagged, 0);
    assert_eq!(summary.skipped_missing, 1);
    assert_eq!(summary.skipped_flagged, 0);
    assert_approx_eq!(summary.mean_track_error_km.unwrap(), 111.195, 0.01);
    assert_eq!(summary.mean_abs_pressure_error_mb, Some(0.0));
}

#[test]
fn test_summary_of_empty_diff() {
    let start = parse_compact("2012082600").unwrap();
    let a = LinearStorm::default().track(start, &HOURS);
    let b = LinearStorm::default().track(parse_compact("2013082600").unwrap(), &HOURS);

    let summary = compute_diff(&a, &b, &DiffOptions::default()).summary();
    assert_eq!(summary.compared, 0);
    assert_eq!(summary.mean_track_error_km, None);
    assert_eq!(summary.max_track_error_km, None);
}

#[test]
fn test_diff_serializes_to_json() {
    let start = parse_compact("2012082600").unwrap();
    let track = LinearStorm::default().track(start, &HOURS);
    let diff = compute_diff(&track, &track, &DiffOptions::default());

    let json = serde_json::to_value(&diff).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), HOURS.len());
    assert_eq!(entries[0]["track_error_km"], 0.0);
    assert_eq!(diff.series(TrackAttribute::ForecastHour).len(), HOURS.len());
}
