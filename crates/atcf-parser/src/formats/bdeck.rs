//! NHC b-deck (best track) reader.
//!
//! B-decks are gzipped comma-separated ATCF files named
//! `b{basin}{nn}{yyyy}.dat.gz`, e.g. `bal092012.dat.gz`. Each synoptic time
//! may appear on several lines, one per wind radii threshold; the first line
//! for a time is used. Forecast hours are counted from the experiment start
//! date and earlier records are dropped.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use tc_common::time::{hours_between, parse_compact_as, pretty, CompactFormat};
use tc_common::{Observation, StormInfo, Track, TrackBuilder};
use tracing::{debug, info, info_span, warn};

use super::{field, finish, position, TrackFormat};
use crate::error::{AtcfError, RecordError, Result};
use crate::filter::ObservationFilter;
use crate::options::ParseOptions;
use crate::source;

const BASIN_IDX: usize = 0;
const STORM_NUMBER_IDX: usize = 1;
const DATE_IDX: usize = 2;
const TRACK_TYPE_IDX: usize = 4;
const LAT_IDX: usize = 6;
const LON_IDX: usize = 7;
const MAXWIND_IDX: usize = 8;
const MSLP_IDX: usize = 9;
const STORM_NAME_IDX: usize = 27;

const MIN_TOKEN_COUNT: usize = MSLP_IDX + 1;
const BEST_TRACK: &str = "BEST";

/// Split a storm id such as `09L` into its number and basin letter.
pub fn split_storm_id(storm_id: &str) -> Result<(u32, char)> {
    let id = storm_id.trim();
    let invalid = || AtcfError::InvalidStormId(storm_id.to_string());

    let (split, letter) = id.char_indices().last().ok_or_else(invalid)?;
    let digits = &id[..split];
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let number = digits.parse().map_err(|_| invalid())?;
    Ok((number, letter.to_ascii_uppercase()))
}

/// Two-letter ATCF basin for a storm id's basin letter.
pub fn basin_code(letter: char) -> Option<&'static str> {
    match letter.to_ascii_uppercase() {
        'L' => Some("al"),
        'E' => Some("ep"),
        'C' => Some("cp"),
        'Q' => Some("sl"),
        'S' => Some("sp"),
        _ => None,
    }
}

/// Warning center responsible for an ATCF basin.
fn center_for_basin(basin: &str) -> &'static str {
    match basin.to_ascii_uppercase().as_str() {
        "AL" | "EP" => "NHC",
        "CP" => "CPHC",
        _ => "JTWC",
    }
}

/// B-deck file name for a storm in the year of `start`.
pub fn bdeck_file_name(storm_id: &str, start: &DateTime<Utc>) -> Result<String> {
    let (number, letter) = split_storm_id(storm_id)?;
    let basin =
        basin_code(letter).ok_or_else(|| AtcfError::InvalidStormId(storm_id.to_string()))?;
    Ok(format!("b{}{:02}{}.dat.gz", basin, number, start.year()))
}

/// Read the best track of `storm_id` from a directory of b-decks.
pub fn parse_dir(
    dir: &Path,
    storm_id: &str,
    start: DateTime<Utc>,
    options: &ParseOptions,
) -> Result<Track> {
    let path = dir.join(bdeck_file_name(storm_id, &start)?);
    info!(path = %path.display(), "Reading best track");
    parse(&path, start, options)
}

/// Tracks which synoptic times of a best track have been used.
///
/// Shared by the b-deck and TC vitals readers, which both count forecast
/// hours from an experiment start date.
#[derive(Debug)]
pub(crate) struct BestTrackTimes {
    start: DateTime<Utc>,
    seen: HashSet<DateTime<Utc>>,
}

impl BestTrackTimes {
    pub(crate) fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            seen: HashSet::new(),
        }
    }

    /// Forecast hour of a record at `date`, or `None` if the time was
    /// already used or is before the start date.
    pub(crate) fn accept(&mut self, date: DateTime<Utc>) -> Option<i64> {
        if self.seen.contains(&date) {
            return None;
        }
        if date < self.start {
            debug!(date = %pretty(&date), "Skipping earlier date");
            return None;
        }
        self.seen.insert(date);
        Some(hours_between(&self.start, &date))
    }

    pub(crate) fn observation(&self, date: DateTime<Utc>, fhr: i64) -> Observation {
        Observation {
            valid_time: date,
            ..Observation::at_forecast_hour(self.start, fhr)
        }
    }
}

/// One decoded b-deck line.
#[derive(Debug, Clone, PartialEq)]
pub struct BestTrackRecord {
    pub date: DateTime<Utc>,
    pub is_best: bool,
    pub lat: f64,
    pub lon: f64,
    pub max_wind: f64,
    pub mslp: f64,
    pub storm: StormInfo,
}

/// Decode one b-deck line.
pub fn parse_record(line: &str) -> std::result::Result<BestTrackRecord, RecordError> {
    let tokens = TrackFormat::BDeck.delimiter().split(line);
    if tokens.len() < MIN_TOKEN_COUNT {
        return Err(RecordError::FieldCount {
            expected: "at least 10",
            found: tokens.len(),
        });
    }

    let date = parse_compact_as(tokens[DATE_IDX], CompactFormat::Hour)?;
    let (lat, lon) = position(tokens[LAT_IDX], tokens[LON_IDX])?;

    let basin = tokens[BASIN_IDX].to_uppercase();
    let mut storm = StormInfo {
        center: center_for_basin(&basin).to_string(),
        basin,
        ..Default::default()
    };
    if let Ok(number) = tokens[STORM_NUMBER_IDX].parse() {
        storm.number = number;
    }
    if let Some(name) = tokens.get(STORM_NAME_IDX).filter(|name| !name.is_empty()) {
        storm.name = name.to_string();
    }

    Ok(BestTrackRecord {
        date,
        is_best: tokens[TRACK_TYPE_IDX] == BEST_TRACK,
        lat,
        lon,
        max_wind: field(&tokens, MAXWIND_IDX, "max wind")?,
        mslp: field(&tokens, MSLP_IDX, "pressure")?,
        storm,
    })
}

/// Read a b-deck file, plain or gzipped, counting forecast hours from
/// `start`.
pub fn parse(path: &Path, start: DateTime<Utc>, options: &ParseOptions) -> Result<Track> {
    let _span = info_span!("parse_bdeck", path = %path.display(), start = %pretty(&start)).entered();

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
                warn!(line = idx + 1, error = %e, "Unrecognized line in b-deck, ignoring it");
                continue;
            }
        };
        if !record.is_best {
            debug!(line = idx + 1, "Skipping non-BEST record");
            continue;
        }

        if !have_storm {
            *builder.storm_mut() = record.storm.clone();
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
            debug!(observation = %obs, "Appending b-deck entry");
            builder.push(obs);
        }
    }

    finish(builder, TrackFormat::BDeck, path, options)
}
