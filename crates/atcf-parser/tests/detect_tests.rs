//! Format detection and dispatch through `parse_track`.

use atcf_parser::{detect_format, parse_track, AtcfError, DetectOptions, TrackFormat};
use tc_common::time::parse_compact;
use test_utils::fixtures;
use test_utils::{temp_test_dir, write_fixture, write_gzip_fixture};

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_detect_by_first_line() {
    let dir = temp_test_dir();
    let cases = [
        ("fcst_track", fixtures::diapost::TRACK, TrackFormat::Diapost),
        ("fort.69", fixtures::gfdl::FORT69, TrackFormat::Gfdl),
        ("hnr1.trk", fixtures::nolan::TRACK, TrackFormat::Nolan),
        ("g5nr.trk", fixtures::geos5::TRACK, TrackFormat::Geos5),
        ("syndat", fixtures::tcvitals::RECORDS, TrackFormat::Syndat),
    ];

    for (name, body, expected) in cases {
        let path = write_fixture(dir.path(), name, body);
        assert_eq!(detect_format(&path).unwrap(), expected, "{name}");
    }
}

#[test]
fn test_detect_gfdl_without_spaces_after_commas() {
    let dir = temp_test_dir();
    let packed: String = fixtures::gfdl::FORT69
        .lines()
        .map(|line| line.replace(", ", ",") + "\n")
        .collect();
    let path = write_fixture(dir.path(), "fort.69", &packed);

    assert_eq!(detect_format(&path).unwrap(), TrackFormat::Gfdl);
    let track = parse_track(&path, &DetectOptions::default()).unwrap();
    assert_eq!(track.len(), 3);
}

#[test]
fn test_detect_skips_leading_blank_lines() {
    let dir = temp_test_dir();
    let body = format!("\n   \n{}", fixtures::diapost::TRACK);
    let path = write_fixture(dir.path(), "fcst_track", &body);
    assert_eq!(detect_format(&path).unwrap(), TrackFormat::Diapost);
}

#[test]
fn test_directory_means_bdeck() {
    let dir = temp_test_dir();
    assert_eq!(detect_format(dir.path()).unwrap(), TrackFormat::BDeck);
}

#[test]
fn test_unknown_field_count() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "odd", "a b c d e f g\n");
    assert!(matches!(
        detect_format(&path),
        Err(AtcfError::UnrecognizedFormat(_))
    ));
}

#[test]
fn test_empty_file() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "empty", "");
    assert!(matches!(
        detect_format(&path),
        Err(AtcfError::UnrecognizedFormat(_))
    ));
}

#[test]
fn test_missing_path() {
    let dir = temp_test_dir();
    assert!(matches!(
        detect_format(&dir.path().join("missing")),
        Err(AtcfError::FileNotFound(_))
    ));
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_parse_track_routes_diapost() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "fcst_track", fixtures::diapost::TRACK);

    let track = parse_track(&path, &DetectOptions::default()).unwrap();
    assert_eq!(track.len(), fixtures::diapost::UNFLAGGED_COUNT);
}

#[test]
fn test_parse_track_routes_geos5() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "g5nr.trk", fixtures::geos5::TRACK);

    let track = parse_track(&path, &DetectOptions::default()).unwrap();
    assert_eq!(track.len(), 3);
    assert!(track.iter().all(|obs| obs.forecast_hour.is_none()));
}

#[test]
fn test_explicit_format_bypasses_detection() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "fcst_track", fixtures::diapost::TRACK);
    let options = DetectOptions {
        format: Some(TrackFormat::Gfdl),
        ..Default::default()
    };

    let track = parse_track(&path, &options).unwrap();
    assert!(track.is_empty());
}

#[test]
fn test_syndat_needs_storm_id() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "syndat", fixtures::tcvitals::RECORDS);
    let options = DetectOptions {
        start_date: Some(parse_compact(fixtures::tcvitals::START).unwrap()),
        ..Default::default()
    };

    assert!(matches!(
        parse_track(&path, &options),
        Err(AtcfError::MissingParameter(_))
    ));
}

#[test]
fn test_syndat_with_context() {
    let dir = temp_test_dir();
    let path = write_fixture(dir.path(), "syndat", fixtures::tcvitals::RECORDS);
    let options = DetectOptions {
        storm_id: Some(fixtures::tcvitals::STORM_ID.to_string()),
        start_date: Some(parse_compact(fixtures::tcvitals::START).unwrap()),
        ..Default::default()
    };

    let track = parse_track(&path, &options).unwrap();
    assert_eq!(track.len(), fixtures::tcvitals::HOURS.len());
}

#[test]
fn test_bdeck_directory_needs_start_date() {
    let dir = temp_test_dir();
    write_gzip_fixture(dir.path(), fixtures::bdeck::FILE_NAME, fixtures::bdeck::TRACK);
    let options = DetectOptions {
        storm_id: Some(fixtures::bdeck::STORM_ID.to_string()),
        ..Default::default()
    };

    assert!(matches!(
        parse_track(dir.path(), &options),
        Err(AtcfError::MissingParameter(_))
    ));
}

#[test]
fn test_bdeck_directory() {
    let dir = temp_test_dir();
    write_gzip_fixture(dir.path(), fixtures::bdeck::FILE_NAME, fixtures::bdeck::TRACK);
    let options = DetectOptions {
        storm_id: Some(fixtures::bdeck::STORM_ID.to_string()),
        start_date: Some(parse_compact(fixtures::bdeck::START).unwrap()),
        ..Default::default()
    };

    let track = parse_track(dir.path(), &options).unwrap();
    assert_eq!(track.len(), fixtures::bdeck::HOURS.len());
}

#[test]
fn test_bdeck_file_with_explicit_format() {
    let dir = temp_test_dir();
    let path = write_gzip_fixture(dir.path(), fixtures::bdeck::FILE_NAME, fixtures::bdeck::TRACK);
    let options = DetectOptions {
        format: Some(TrackFormat::BDeck),
        start_date: Some(parse_compact(fixtures::bdeck::START).unwrap()),
        ..Default::default()
    };

    let track = parse_track(&path, &options).unwrap();
    assert_eq!(track.len(), fixtures::bdeck::HOURS.len());
}
