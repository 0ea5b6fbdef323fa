//! Plain-text and JSON rendering of tracks and diffs.

use serde::Serialize;
use tc_common::time::pretty;
use tc_common::Track;
use track_diff::{DiffSummary, TrackDiff};

fn hour(fhr: Option<i64>) -> String {
    fhr.map_or_else(|| "-".to_string(), |h| h.to_string())
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Fixed-width table of a track, one row per observation.
pub fn track_table(track: &Track) -> String {
    let storm = track.storm();
    let mut out = format!(
        "{} {} {} ({} observations, reference {})\n",
        storm.center,
        storm.storm_id(),
        storm.name,
        track.len(),
        track
            .reference_time()
            .map_or_else(|| "-".to_string(), |t| pretty(&t)),
    );
    out.push_str(&format!(
        "{:>5}  {:<20}  {:>4}  {:>7}  {:>8}  {:>7}  {:>6}\n",
        "fhr", "valid time", "flag", "lat", "lon", "mslp", "wind"
    ));
    for obs in track {
        out.push_str(&format!(
            "{:>5}  {:<20}  {:>4}  {:>7.2}  {:>8.2}  {:>7.1}  {:>6.1}\n",
            hour(obs.forecast_hour),
            pretty(&obs.valid_time),
            if obs.flagged { "*" } else { "" },
            obs.lat,
            obs.lon,
            obs.mslp,
            obs.max_wind,
        ));
    }
    out
}

/// Fixed-width table of a diff followed by its summary.
pub fn diff_table(diff: &TrackDiff) -> String {
    let mut out = format!(
        "{:>5}  {:<20}  {:>4}  {:>10}  {:>9}  {:>9}\n",
        "fhr", "valid time", "flag", "track km", "mslp mb", "wind kts"
    );
    for entry in diff {
        out.push_str(&format!(
            "{:>5}  {:<20}  {:>4}  {:>10.2}  {:>9.2}  {:>9.2}\n",
            hour(entry.forecast_hour),
            pretty(&entry.valid_time),
            if entry.flagged { "*" } else { "" },
            entry.track_error_km,
            entry.pressure_error_mb,
            entry.wind_error_kts,
        ));
    }
    for skipped in diff.skipped() {
        out.push_str(&format!(
            "{:>5}  {:<20}  skipped: {}\n",
            hour(skipped.forecast_hour),
            pretty(&skipped.valid_time),
            skipped.reason,
        ));
    }
    out.push_str(&summary_lines(&diff.summary()));
    out
}

fn summary_lines(summary: &DiffSummary) -> String {
    format!(
        "\ncompared: {}  flagged: {}  skipped (missing): {}  skipped (flagged): {}\n\
         mean track error: {} km  max track error: {} km\n\
         mean |mslp error|: {} mb  mean |wind error|: {} kts\n",
        summary.compared,
        summary.flagged,
        summary.skipped_missing,
        summary.skipped_flagged,
        optional(summary.mean_track_error_km),
        optional(summary.max_track_error_km),
        optional(summary.mean_abs_pressure_error_mb),
        optional(summary.mean_abs_wind_error_kts),
    )
}

#[derive(Serialize)]
struct DiffReport<'a> {
    diff: &'a TrackDiff,
    summary: DiffSummary,
}

/// JSON document holding the diff and its summary.
pub fn diff_json(diff: &TrackDiff) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DiffReport {
        diff,
        summary: diff.summary(),
    })
}
