//! Diapost `fcst_track` reader.
//!
//! Eight whitespace-separated fields per line:
//!
//! ```text
//! 2005080100 6 0 0 -41.2 17.1 992 78
//! [start]   [fhr] [flag] [lon] [lat] [mslp mb] [max wind kts]
//!              [unused]
//! ```

use std::path::Path;

use tc_common::time::{parse_compact_as, CompactFormat};
use tc_common::{Observation, Track, TrackBuilder};
use tracing::{debug, info_span, warn};

use super::{field, finish, TrackFormat};
use crate::error::{RecordError, Result};
use crate::filter::ObservationFilter;
use crate::options::ParseOptions;
use crate::source;

const TOKEN_COUNT: usize = 8;
const START_DATE_IDX: usize = 0;
const FHR_IDX: usize = 1;
const FLAG_IDX: usize = 3;
const LON_IDX: usize = 4;
const LAT_IDX: usize = 5;
const MSLP_IDX: usize = 6;
const MAXWIND_IDX: usize = 7;

/// Read a Diapost track file.
pub fn parse(path: &Path, options: &ParseOptions) -> Result<Track> {
    let _span = info_span!("parse_diapost", path = %path.display()).entered();

    let filter = ObservationFilter::new(options)?;
    let lines = source::read_lines(path)?;
    let mut builder = TrackBuilder::new();

    for (idx, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let obs = match parse_record(line) {
            Ok(obs) => obs,
            Err(e) => {
                warn!(line = idx + 1, error = %e, "Unrecognized line in Diapost file, ignoring it");
                continue;
            }
        };

        if filter.admit(&obs) {
            debug!(observation = %obs, "Appending Diapost entry");
            builder.push(obs);
        }
    }

    finish(builder, TrackFormat::Diapost, path, options)
}

/// Parse one Diapost line.
pub fn parse_record(line: &str) -> std::result::Result<Observation, RecordError> {
    let tokens = TrackFormat::Diapost.delimiter().split(line);
    if tokens.len() != TOKEN_COUNT {
        return Err(RecordError::FieldCount {
            expected: "8",
            found: tokens.len(),
        });
    }

    let start = parse_compact_as(tokens[START_DATE_IDX], CompactFormat::Hour)?;
    let fhr: i64 = field(&tokens, FHR_IDX, "forecast hour")?;
    let flag: i64 = field(&tokens, FLAG_IDX, "flag")?;

    Ok(Observation::at_forecast_hour(start, fhr)
        .with_position(
            field(&tokens, LAT_IDX, "latitude")?,
            field(&tokens, LON_IDX, "longitude")?,
        )
        .with_intensity(
            field(&tokens, MSLP_IDX, "pressure")?,
            field(&tokens, MAXWIND_IDX, "max wind")?,
        )
        .with_flag(flag != 0))
}
