//! SYNDAT / TC vitals reader.
//!
//! ```text
//! NHC  09L ISAAC     20120826 0000 230N 0780W 300 050 0995 1009 0250 28 -99 0120 0150 0060 0060 D
//! ```
//!
//! Whitespace separated, 19 fields in the short form and 30 in the long one.
//! A SYNDAT file holds records for every active storm, so only those with
//! the requested storm id are read. Maximum wind is written in m/s.

use std::path::Path;

use chrono::{DateTime, Utc};
use tc_common::time::{parse_compact_as, pretty, CompactFormat};
use tc_common::units::mps_to_knots;
use tc_common::{StormInfo, Track, TrackBuilder};
use tracing::{debug, info_span, warn};

use super::bdeck::{basin_code, split_storm_id, BestTrackTimes};
use super::{field, finish, position, TrackFormat};
use crate::error::{RecordError, Result};
use crate::filter::ObservationFilter;
use crate::options::ParseOptions;
use crate::source;

pub const SHORT_TOKEN_COUNT: usize = 19;
pub const LONG_TOKEN_COUNT: usize = 30;

const CENTER_IDX: usize = 0;
const STORM_ID_IDX: usize = 1;
const NAME_IDX: usize = 2;
const DATE_IDX: usize = 3;
const TIME_IDX: usize = 4;
const LAT_IDX: usize = 5;
const LON_IDX: usize = 6;
const MSLP_IDX: usize = 9;
const MAXWIND_MPS_IDX: usize = 12;

/// One decoded vitals record.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsRecord {
    pub center: String,
    pub storm_id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub mslp: f64,
    /// Knots.
    pub max_wind: f64,
}

impl VitalsRecord {
    fn storm(&self) -> StormInfo {
        let mut storm = StormInfo {
            center: self.center.clone(),
            name: self.name.clone(),
            ..Default::default()
        };
        if let Ok((number, letter)) = split_storm_id(&self.storm_id) {
            storm.number = number;
            storm.basin = basin_code(letter)
                .map(str::to_uppercase)
                .unwrap_or_else(|| letter.to_string());
        }
        storm
    }
}

/// Decode one vitals record.
pub fn parse_record(line: &str) -> std::result::Result<VitalsRecord, RecordError> {
    let tokens = TrackFormat::Syndat.delimiter().split(line);
    if tokens.len() != SHORT_TOKEN_COUNT && tokens.len() != LONG_TOKEN_COUNT {
        return Err(RecordError::FieldCount {
            expected: "19 or 30",
            found: tokens.len(),
        });
    }

    let stamp = format!("{}{}", tokens[DATE_IDX], tokens[TIME_IDX]);
    let date = parse_compact_as(&stamp, CompactFormat::Minute)?;
    let (lat, lon) = position(tokens[LAT_IDX], tokens[LON_IDX])?;
    let wind_mps: f64 = field(&tokens, MAXWIND_MPS_IDX, "max wind")?;

    Ok(VitalsRecord {
        center: tokens[CENTER_IDX].to_string(),
        storm_id: tokens[STORM_ID_IDX].to_uppercase(),
        name: tokens[NAME_IDX].to_string(),
        date,
        lat,
        lon,
        mslp: field(&tokens, MSLP_IDX, "pressure")?,
        max_wind: mps_to_knots(wind_mps),
    })
}

/// Read the records of `storm_id` from a SYNDAT file, counting forecast
/// hours from `start`.
pub fn parse(
    path: &Path,
    storm_id: &str,
    start: DateTime<Utc>,
    options: &ParseOptions,
) -> Result<Track> {
    let _span = info_span!(
        "parse_syndat",
        path = %path.display(),
        storm_id,
        start = %pretty(&start)
    )
    .entered();

    split_storm_id(storm_id)?;
    let filter = ObservationFilter::new(options)?;
    let lines = source::read_lines(path)?;
    let mut builder = TrackBuilder::new().with_reference_time(start);
    let mut times = BestTrackTimes::new(start);
    let mut have_storm = false;

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_record(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Unrecognized line in SYNDAT file, ignoring it");
                continue;
            }
        };
        if !record.storm_id.eq_ignore_ascii_case(storm_id.trim()) {
            continue;
        }

        if !have_storm {
            *builder.storm_mut() = record.storm();
            have_storm = true;
        }

        let Some(fhr) = times.accept(record.date) else {
            continue;
        };

        let obs = times
            .observation(record.date, fhr)
            .with_position(record.lat, record.lon)
            .with_intensity(record.mslp, record.max_wind);
        if filter.admit(&obs) {
            debug!(observation = %obs, "Appending TC vitals entry");
            builder.push(obs);
        }
    }

    finish(builder, TrackFormat::Syndat, path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_common::time::parse_compact;

    const LINE: &str = "NHC  09L ISAAC     20120826 0600 230N 0780W 300 050 0995 1009 0250 28 -99 0120 0150 0060 0060 D";

    #[test]
    fn test_parse_record() {
        let record = parse_record(LINE).unwrap();
        assert_eq!(record.center, "NHC");
        assert_eq!(record.storm_id, "09L");
        assert_eq!(record.name, "ISAAC");
        assert_eq!(record.date, parse_compact("2012082606").unwrap());
        assert_eq!((record.lat, record.lon), (23.0, -78.0));
        assert_eq!(record.mslp, 995.0);
        assert!((record.max_wind - 54.43).abs() < 0.01);
    }

    #[test]
    fn test_storm_metadata() {
        let storm = parse_record(LINE).unwrap().storm();
        assert_eq!(storm.center, "NHC");
        assert_eq!(storm.basin, "AL");
        assert_eq!(storm.number, 9);
        assert_eq!(storm.storm_id(), "09L");
    }

    #[test]
    fn test_rejects_other_lengths() {
        assert!(matches!(
            parse_record("NHC 09L ISAAC 20120826 0600"),
            Err(RecordError::FieldCount { found: 5, .. })
        ));
    }
}
