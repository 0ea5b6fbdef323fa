//! GFDL vortex tracker ATCF output (`fort.64` and `fort.69`).
//!
//! Records are comma separated. `fort.64` records have 43 fields and
//! `fort.69` records have 20, with the forecast hour written in hundredths.
//! The tracker writes up to three records per forecast hour (one per wind
//! radii threshold); only the first is used since position and intensity
//! are the same in all of them.
//!
//! When the tracker loses the storm it writes a latitude of `0`. Those
//! readings are kept as flagged placeholders with zeroed values.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use tc_common::time::{parse_compact_as, CompactFormat};
use tc_common::{Observation, StormInfo, Track, TrackBuilder};
use tracing::{debug, info, info_span, warn};

use super::{field, finish, position, TrackFormat};
use crate::error::{RecordError, Result};
use crate::filter::ObservationFilter;
use crate::options::ParseOptions;
use crate::source;

pub const FORT64_TOKEN_COUNT: usize = 43;
pub const FORT69_TOKEN_COUNT: usize = 20;

const BASIN_IDX: usize = 0;
const STORM_NUMBER_IDX: usize = 1;
const START_DATE_IDX: usize = 2;
const MODEL_IDX: usize = 4;
const FHR_IDX: usize = 5;
const LAT_IDX: usize = 6;
const LON_IDX: usize = 7;
const MAXWIND_IDX: usize = 8;
const MSLP_IDX: usize = 9;

/// Latitude written by the tracker when it produced no fix.
const NO_FIX_LAT: &str = "0";

/// One decoded tracker record.
#[derive(Debug, Clone, PartialEq)]
pub struct GfdlRecord {
    pub start: DateTime<Utc>,
    pub forecast_hour: i64,
    /// `None` when the tracker produced no fix for this hour.
    pub position: Option<(f64, f64)>,
    pub mslp: f64,
    pub max_wind: f64,
    pub basin: String,
    pub storm_number: Option<u32>,
    pub model: String,
}

impl GfdlRecord {
    fn observation(&self, flagged: bool) -> Observation {
        let obs = Observation::at_forecast_hour(self.start, self.forecast_hour);
        match self.position {
            Some((lat, lon)) => obs
                .with_position(lat, lon)
                .with_intensity(self.mslp, self.max_wind)
                .with_flag(flagged),
            None => obs.with_flag(true),
        }
    }

    fn storm(&self) -> StormInfo {
        let mut storm = StormInfo {
            center: self.model.clone(),
            basin: self.basin.clone(),
            ..Default::default()
        };
        if let Some(number) = self.storm_number {
            storm.number = number;
        }
        storm
    }
}

/// Decode one record.
pub fn parse_record(line: &str) -> std::result::Result<GfdlRecord, RecordError> {
    let tokens = TrackFormat::Gfdl.delimiter().split(line);
    let is_fort69 = match tokens.len() {
        FORT64_TOKEN_COUNT => false,
        FORT69_TOKEN_COUNT => true,
        found => {
            return Err(RecordError::FieldCount {
                expected: "20 or 43",
                found,
            })
        }
    };

    let mut forecast_hour: i64 = field(&tokens, FHR_IDX, "forecast hour")?;
    if is_fort69 {
        forecast_hour /= 100;
    }
    let start = parse_compact_as(tokens[START_DATE_IDX], CompactFormat::Hour)?;

    let (position, mslp, max_wind) = if tokens[LAT_IDX] == NO_FIX_LAT {
        (None, 0.0, 0.0)
    } else {
        (
            Some(position(tokens[LAT_IDX], tokens[LON_IDX])?),
            field(&tokens, MSLP_IDX, "pressure")?,
            field(&tokens, MAXWIND_IDX, "max wind")?,
        )
    };

    Ok(GfdlRecord {
        start,
        forecast_hour,
        position,
        mslp,
        max_wind,
        basin: tokens[BASIN_IDX].to_uppercase(),
        storm_number: tokens[STORM_NUMBER_IDX].parse().ok(),
        model: tokens[MODEL_IDX].to_string(),
    })
}

/// Read the forecast hours listed in a flagged-hours file.
///
/// One integer per line. Blank lines are ignored and malformed lines are
/// logged and skipped. A missing file yields an empty set.
pub fn read_flagged_hours(path: &Path) -> Result<HashSet<i64>> {
    if !path.exists() {
        debug!(path = %path.display(), "Flagged hours file does not exist");
        return Ok(HashSet::new());
    }

    let mut hours = HashSet::new();
    for line in source::read_lines(path)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<i64>() {
            Ok(hour) => {
                hours.insert(hour);
            }
            Err(_) => warn!(value = line, "Ignoring malformed flagged hour"),
        }
    }
    Ok(hours)
}

/// Read a GFDL tracker ATCF file.
pub fn parse(path: &Path, options: &ParseOptions) -> Result<Track> {
    let _span = info_span!("parse_gfdl", path = %path.display()).entered();

    let filter = ObservationFilter::new(options)?;
    let lines = source::read_lines(path)?;
    let mut flagged_hours = match &options.flagged_hours_file {
        Some(file) => read_flagged_hours(file)?,
        None => HashSet::new(),
    };

    let mut builder = TrackBuilder::new();
    let mut seen_hours = HashSet::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_record(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    line = idx + 1,
                    error = %e,
                    "Unrecognized line in GFDL tracker output, ignoring it"
                );
                continue;
            }
        };
        let fhr = record.forecast_hour;

        if seen_hours.contains(&fhr) {
            continue;
        }
        if filter.beyond_duration(fhr) {
            info!(fhr, "Skipping forecast hour after the requested duration");
            continue;
        }
        seen_hours.insert(fhr);

        if builder.reference_time().is_none() {
            builder = builder
                .with_reference_time(record.start)
                .with_storm(record.storm());
        }

        if record.position.is_none() {
            warn!(
                fhr,
                start = %record.start,
                "Flagging forecast hour, tracker produced no fix"
            );
            flagged_hours.insert(fhr);
        }

        let obs = record.observation(flagged_hours.contains(&fhr));
        if filter.admit(&obs) {
            debug!(observation = %obs, "Appending GFDL tracker entry");
            builder.push(obs);
        }
    }

    finish(builder, TrackFormat::Gfdl, path, options)
}
