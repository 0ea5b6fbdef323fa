//! Reader for the hnr1 track files from Dave Nolan's nature run.
//!
//! 13 whitespace-separated fields. The first field is the valid time as
//! `YYYYMMDDHHMMSS`; the first 14 characters of the file are the start time.
//! Pressure is written in Pa. Readings are never flagged.

use std::path::Path;

use chrono::{DateTime, Utc};
use tc_common::time::{hours_between, parse_compact_as, CompactFormat};
use tc_common::units::pa_to_hpa;
use tc_common::{Observation, Track, TrackBuilder};
use tracing::{debug, info_span, warn};

use super::{field, finish, TrackFormat};
use crate::error::{RecordError, Result};
use crate::filter::ObservationFilter;
use crate::options::ParseOptions;
use crate::source;

const TOKEN_COUNT: usize = 13;
const DATE_IDX: usize = 0;
const LAT_IDX: usize = 4;
const LON_IDX: usize = 5;
const PRESSURE_PA_IDX: usize = 6;
const MAXWIND_IDX: usize = 7;

/// Read a Nolan/hnr1 track file.
pub fn parse(path: &Path, options: &ParseOptions) -> Result<Track> {
    let _span = info_span!("parse_nolan", path = %path.display()).entered();

    let filter = ObservationFilter::new(options)?;
    let lines = source::read_lines(path)?;
    let Some(first) = lines.iter().find(|line| !line.trim().is_empty()) else {
        return finish(TrackBuilder::new(), TrackFormat::Nolan, path, options);
    };

    let reference = reference_time(first)?;
    let mut builder = TrackBuilder::new().with_reference_time(reference);

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let obs = match parse_record(line, reference) {
            Ok(obs) => obs,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Unrecognized line in hnr1 track file, ignoring it");
                continue;
            }
        };

        if filter.admit(&obs) {
            debug!(observation = %obs, "Appending hnr1 entry");
            builder.push(obs);
        }
    }

    finish(builder, TrackFormat::Nolan, path, options)
}

/// Start time from the leading 14 characters of the first line.
fn reference_time(first_line: &str) -> Result<DateTime<Utc>> {
    let trimmed = first_line.trim_start();
    let stamp: String = trimmed.chars().take(CompactFormat::Second.width()).collect();
    Ok(parse_compact_as(&stamp, CompactFormat::Second)?)
}

/// Parse one line against the file's start time.
pub fn parse_record(
    line: &str,
    reference: DateTime<Utc>,
) -> std::result::Result<Observation, RecordError> {
    let tokens = TrackFormat::Nolan.delimiter().split(line);
    if tokens.len() != TOKEN_COUNT {
        return Err(RecordError::FieldCount {
            expected: "13",
            found: tokens.len(),
        });
    }

    let valid = parse_compact_as(tokens[DATE_IDX], CompactFormat::Second)?;
    let fhr = hours_between(&reference, &valid);
    let pressure_pa: f64 = field(&tokens, PRESSURE_PA_IDX, "pressure")?;

    Ok(Observation {
        valid_time: valid,
        ..Observation::at_forecast_hour(reference, fhr)
    }
    .with_position(
        field(&tokens, LAT_IDX, "latitude")?,
        field(&tokens, LON_IDX, "longitude")?,
    )
    .with_intensity(pa_to_hpa(pressure_pa), field(&tokens, MAXWIND_IDX, "max wind")?))
}
