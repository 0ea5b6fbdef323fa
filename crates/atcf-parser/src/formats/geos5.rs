//! GEOS-5 nature run (g5nr) tracker output.
//!
//! ```text
//! 2006/09/12 03:30 ; 34.5000 ; 273.750 ; 0 ; 1001.50 ; 75.3543 ; 32.8331 ; 40.5677
//! ```
//!
//! Split on whitespace the separators become tokens of their own, giving 16
//! tokens. Longitudes are degrees east in 0..360. There is no forecast hour;
//! the first line's time is the reference time.

use std::path::Path;

use chrono::{DateTime, Utc};
use tc_common::time::parse_slash_datetime;
use tc_common::{Observation, Track, TrackBuilder};
use tracing::{debug, info_span, warn};

use super::{field, finish, TrackFormat};
use crate::error::{RecordError, Result};
use crate::filter::ObservationFilter;
use crate::options::ParseOptions;
use crate::source;

const TOKEN_COUNT: usize = 16;
const DATE_IDX: usize = 0;
const TIME_IDX: usize = 1;
const LAT_IDX: usize = 3;
const LON_IDX: usize = 5;
const MSLP_IDX: usize = 9;
/// 10 m wind. Index 11 holds the 850 hPa wind.
const MAXWIND_IDX: usize = 13;

/// Read a GEOS-5 tracker file.
pub fn parse(path: &Path, options: &ParseOptions) -> Result<Track> {
    let _span = info_span!("parse_geos5", path = %path.display()).entered();

    let filter = ObservationFilter::new(options)?;
    let lines = source::read_lines(path)?;
    let Some(first) = lines.iter().find(|line| !line.trim().is_empty()) else {
        return finish(TrackBuilder::new(), TrackFormat::Geos5, path, options);
    };

    let reference = line_time(first)?;
    let mut builder = TrackBuilder::new().with_reference_time(reference);

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let obs = match parse_record(line, reference) {
            Ok(obs) => obs,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Unrecognized line in GEOS-5 track file, ignoring it");
                continue;
            }
        };

        if filter.admit(&obs) {
            debug!(observation = %obs, "Appending GEOS-5 entry");
            builder.push(obs);
        }
    }

    finish(builder, TrackFormat::Geos5, path, options)
}

fn line_time(line: &str) -> std::result::Result<DateTime<Utc>, tc_common::TimeParseError> {
    let mut tokens = line.split_whitespace();
    let date = tokens.next().unwrap_or_default();
    let time = tokens.next().unwrap_or_default();
    parse_slash_datetime(date, time)
}

/// Parse one line against the file's reference time.
pub fn parse_record(
    line: &str,
    reference: DateTime<Utc>,
) -> std::result::Result<Observation, RecordError> {
    let tokens = TrackFormat::Geos5.delimiter().split(line);
    if tokens.len() != TOKEN_COUNT {
        return Err(RecordError::FieldCount {
            expected: "16",
            found: tokens.len(),
        });
    }

    let valid = parse_slash_datetime(tokens[DATE_IDX], tokens[TIME_IDX])?;

    Ok(Observation::at_valid_time(reference, valid)
        .with_position(
            field(&tokens, LAT_IDX, "latitude")?,
            field(&tokens, LON_IDX, "longitude")?,
        )
        .with_intensity(
            field(&tokens, MSLP_IDX, "pressure")?,
            field(&tokens, MAXWIND_IDX, "max wind")?,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_common::time::parse_compact;

    const LINE: &str =
        "2006/09/12 03:30 ; 34.5000 ; 273.750 ; 0 ; 1001.50 ; 75.3543 ; 32.8331 ; 40.5677";

    #[test]
    fn test_parse_record() {
        let reference = parse_compact("200609120000").unwrap();
        let obs = parse_record(LINE, reference).unwrap();
        assert_eq!(obs.forecast_hour, None);
        assert_eq!(obs.valid_time, parse_compact("200609120330").unwrap());
        assert_eq!(obs.reference_time, reference);
        assert_eq!(obs.lat, 34.5);
        assert_eq!(obs.lon, 273.75);
        assert_eq!(obs.mslp, 1001.5);
        assert_eq!(obs.max_wind, 32.8331);
        assert_eq!(obs.elapsed_hours(), 3);
    }

    #[test]
    fn test_line_time() {
        assert_eq!(
            line_time(LINE).unwrap(),
            parse_compact("200609120330").unwrap()
        );
        assert!(line_time("2006-09-12 03:30").is_err());
    }

    #[test]
    fn test_missing_separator_tokens() {
        let line = "2006/09/12 03:30 34.5 273.75 0 1001.5 75.3 32.8 40.5";
        assert!(matches!(
            parse_record(line, parse_compact("2006091200").unwrap()),
            Err(RecordError::FieldCount { found: 9, .. })
        ));
    }
}
