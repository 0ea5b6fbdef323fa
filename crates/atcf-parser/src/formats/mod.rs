//! One reader per tracker output format.
//!
//! Each reader turns a file into a [`Track`]. Records that do not fit the
//! format's layout are logged and skipped; only problems with the file as a
//! whole are returned as errors.

pub mod bdeck;
pub mod diapost;
pub mod gfdl;
pub mod geos5;
pub mod nolan;
pub mod syndat;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tc_common::{Track, TrackBuilder};
use tracing::{info, warn};

use crate::error::{AtcfError, RecordError, Result};
use crate::options::ParseOptions;

/// Supported tracker output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackFormat {
    /// Diapost `fcst_track` files
    Diapost,
    /// GFDL vortex tracker ATCF (`fort.64` / `fort.69`)
    Gfdl,
    /// Dave Nolan's hnr1 track files
    Nolan,
    /// GEOS-5 nature run (g5nr) tracker
    Geos5,
    /// NHC b-deck best track
    BDeck,
    /// SYNDAT / TC vitals records
    Syndat,
}

/// How the fields of a record are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Whitespace,
    /// Comma-separated, with the whitespace around each field trimmed.
    Comma,
}

impl Delimiter {
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Whitespace => line.split_whitespace().collect(),
            Delimiter::Comma => line.split(',').map(str::trim).collect(),
        }
    }
}

impl TrackFormat {
    pub fn all() -> &'static [TrackFormat] {
        &[
            TrackFormat::Diapost,
            TrackFormat::Gfdl,
            TrackFormat::Nolan,
            TrackFormat::Geos5,
            TrackFormat::BDeck,
            TrackFormat::Syndat,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrackFormat::Diapost => "diapost",
            TrackFormat::Gfdl => "gfdl",
            TrackFormat::Nolan => "nolan",
            TrackFormat::Geos5 => "geos5",
            TrackFormat::BDeck => "bdeck",
            TrackFormat::Syndat => "syndat",
        }
    }

    pub fn delimiter(&self) -> Delimiter {
        match self {
            TrackFormat::Gfdl | TrackFormat::BDeck => Delimiter::Comma,
            _ => Delimiter::Whitespace,
        }
    }
}

impl fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackFormat {
    type Err = AtcfError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        let alias = match lower.as_str() {
            "gfdltrk" | "fort.64" | "fort.69" => "gfdl",
            "hnr1" => "nolan",
            "g5nr" | "geos5trk" => "geos5",
            "b-deck" | "best" => "bdeck",
            "tcvitals" => "syndat",
            other => other,
        };
        TrackFormat::all()
            .iter()
            .copied()
            .find(|format| format.name() == alias)
            .ok_or_else(|| AtcfError::UnrecognizedFormat(s.to_string()))
    }
}

/// Parse the token at `idx` as a number.
pub(crate) fn field<T: FromStr>(
    tokens: &[&str],
    idx: usize,
    name: &'static str,
) -> std::result::Result<T, RecordError> {
    let raw = tokens.get(idx).copied().unwrap_or_default();
    raw.trim().parse().map_err(|_| RecordError::InvalidField {
        field: name,
        value: raw.to_string(),
    })
}

/// Decode an ATCF `DDDH` position pair.
pub(crate) fn position(
    lat_token: &str,
    lon_token: &str,
) -> std::result::Result<(f64, f64), RecordError> {
    let lat = crate::coords::decode_lat(lat_token).ok_or_else(|| RecordError::InvalidField {
        field: "latitude",
        value: lat_token.to_string(),
    })?;
    let lon = crate::coords::decode_lon(lon_token).ok_or_else(|| RecordError::InvalidField {
        field: "longitude",
        value: lon_token.to_string(),
    })?;
    Ok((lat, lon))
}

/// Build the track, applying the empty-result policy.
pub(crate) fn finish(
    builder: TrackBuilder,
    format: TrackFormat,
    path: &Path,
    options: &ParseOptions,
) -> Result<Track> {
    if builder.is_empty() {
        if options.strict {
            return Err(AtcfError::UnrecognizedFormat(format!(
                "no usable {} records in {}",
                format,
                path.display()
            )));
        }
        warn!(
            format = %format,
            path = %path.display(),
            "No usable records found, returning an empty track"
        );
    }

    let track = builder.build();
    info!(
        format = %format,
        path = %path.display(),
        observations = track.len(),
        "Parsed track"
    );
    Ok(track)
}
