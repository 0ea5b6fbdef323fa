//! Tracker-agnostic track model.
//!
//! A [`Track`] is an ordered list of [`Observation`]s, one per output time of
//! the tracker, plus storm metadata. Tracks are assembled by a
//! [`TrackBuilder`] and are immutable once built.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::time::{format_compact, hours_between, CompactFormat};
use crate::units::knots_to_mps;

/// One tracker reading at a single output time.
///
/// When `flagged` is set the position and intensity may be placeholder
/// zeros and should not be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Analysis (start) time of the track this reading belongs to.
    pub reference_time: DateTime<Utc>,
    /// Hours since `reference_time`. `None` for nature runs.
    pub forecast_hour: Option<i64>,
    /// Absolute time of the reading.
    pub valid_time: DateTime<Utc>,
    pub flagged: bool,
    /// Degrees north.
    pub lat: f64,
    /// Degrees east.
    pub lon: f64,
    /// Central pressure (mb).
    pub mslp: f64,
    /// Maximum sustained wind (kts).
    pub max_wind: f64,
}

impl Observation {
    /// Reading at a forecast hour; the valid time is derived from it.
    pub fn at_forecast_hour(reference_time: DateTime<Utc>, forecast_hour: i64) -> Self {
        Self {
            reference_time,
            forecast_hour: Some(forecast_hour),
            valid_time: reference_time + Duration::hours(forecast_hour),
            flagged: false,
            lat: 0.0,
            lon: 0.0,
            mslp: 0.0,
            max_wind: 0.0,
        }
    }

    /// Reading at an absolute time, without a forecast hour.
    pub fn at_valid_time(reference_time: DateTime<Utc>, valid_time: DateTime<Utc>) -> Self {
        Self {
            forecast_hour: None,
            valid_time,
            ..Self::at_forecast_hour(reference_time, 0)
        }
    }

    pub fn with_position(mut self, lat: f64, lon: f64) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    pub fn with_intensity(mut self, mslp: f64, max_wind: f64) -> Self {
        self.mslp = mslp;
        self.max_wind = max_wind;
        self
    }

    pub fn with_flag(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }

    pub fn reference_epoch(&self) -> i64 {
        self.reference_time.timestamp()
    }

    pub fn valid_epoch(&self) -> i64 {
        self.valid_time.timestamp()
    }

    /// Hours since the reference time, falling back to the valid time when
    /// the reading has no forecast hour.
    pub fn elapsed_hours(&self) -> i64 {
        self.forecast_hour
            .unwrap_or_else(|| hours_between(&self.reference_time, &self.valid_time))
    }

    /// Value of one of the fixed rendering attributes.
    pub fn attribute(&self, attr: TrackAttribute) -> AttributeValue {
        match attr {
            TrackAttribute::Lat => AttributeValue::Number(self.lat),
            TrackAttribute::Lon => AttributeValue::Number(self.lon),
            TrackAttribute::ForecastHour => AttributeValue::Hour(self.forecast_hour),
            TrackAttribute::MaxWind => AttributeValue::Number(self.max_wind),
            TrackAttribute::Mslp => AttributeValue::Number(self.mslp),
            TrackAttribute::Flagged => AttributeValue::Flag(self.flagged),
            TrackAttribute::ForecastDate => AttributeValue::Time(self.valid_time),
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fhr = self
            .forecast_hour
            .map(|h| h.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        write!(
            f,
            "(fdate: {}, fhr: {}, flagged: {}, lat: {}, lon: {}, mslp: {}, maxwind: {})",
            crate::time::pretty(&self.valid_time),
            fhr,
            self.flagged,
            self.lat,
            self.lon,
            self.mslp,
            self.max_wind
        )
    }
}

/// The fixed attribute set exposed to rendering consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackAttribute {
    Lat,
    Lon,
    ForecastHour,
    MaxWind,
    Mslp,
    Flagged,
    ForecastDate,
}

impl TrackAttribute {
    pub fn all() -> &'static [TrackAttribute] {
        &[
            TrackAttribute::Lat,
            TrackAttribute::Lon,
            TrackAttribute::ForecastHour,
            TrackAttribute::MaxWind,
            TrackAttribute::Mslp,
            TrackAttribute::Flagged,
            TrackAttribute::ForecastDate,
        ]
    }

    /// Attribute name as used by plotting code.
    pub fn name(&self) -> &'static str {
        match self {
            TrackAttribute::Lat => "lat",
            TrackAttribute::Lon => "lon",
            TrackAttribute::ForecastHour => "fhr",
            TrackAttribute::MaxWind => "maxwind_value",
            TrackAttribute::Mslp => "mslp_value",
            TrackAttribute::Flagged => "flagged",
            TrackAttribute::ForecastDate => "fcst_date",
        }
    }
}

impl FromStr for TrackAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackAttribute::all()
            .iter()
            .copied()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| format!("Unknown track attribute: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Hour(Option<i64>),
    Flag(bool),
    Time(DateTime<Utc>),
}

impl AttributeValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(v) => Some(*v),
            AttributeValue::Hour(h) => h.map(|h| h as f64),
            AttributeValue::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            AttributeValue::Time(_) => None,
        }
    }
}

/// Storm identification carried by a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormInfo {
    /// Originating center or model (e.g. `NHC`, `HWRF`).
    pub center: String,
    pub name: String,
    pub number: u32,
    /// ATCF basin (`AL`, `EP`, ...) or single-letter basin suffix.
    pub basin: String,
}

impl Default for StormInfo {
    fn default() -> Self {
        Self {
            center: "NA".to_string(),
            name: "UNNAMED".to_string(),
            number: 99,
            basin: String::new(),
        }
    }
}

impl StormInfo {
    /// Storm id in `NNB` form, e.g. `09L`.
    pub fn storm_id(&self) -> String {
        let letter = match self.basin.to_ascii_uppercase().as_str() {
            "AL" | "L" => 'L',
            "EP" | "E" => 'E',
            "CP" | "C" => 'C',
            "SL" | "Q" => 'Q',
            "SP" | "SH" | "S" => 'S',
            "WP" | "W" => 'W',
            "IO" | "A" => 'A',
            _ => 'X',
        };
        format!("{:02}{}", self.number % 100, letter)
    }
}

/// An immutable tracker track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    reference_time: Option<DateTime<Utc>>,
    storm: StormInfo,
    observations: Vec<Observation>,
}

impl Track {
    /// Analysis time of the track. `None` if nothing usable was parsed.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    pub fn reference_epoch(&self) -> Option<i64> {
        self.reference_time.map(|t| t.timestamp())
    }

    pub fn storm(&self) -> &StormInfo {
        &self.storm
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations keyed by absolute epoch seconds.
    pub fn by_valid_epoch(&self) -> HashMap<i64, &Observation> {
        let mut map = HashMap::with_capacity(self.observations.len());
        for obs in &self.observations {
            map.entry(obs.valid_epoch()).or_insert(obs);
        }
        map
    }

    /// Observations keyed by forecast hour. Readings without one are left out.
    pub fn by_forecast_hour(&self) -> HashMap<i64, &Observation> {
        let mut map = HashMap::with_capacity(self.observations.len());
        for obs in &self.observations {
            if let Some(fhr) = obs.forecast_hour {
                map.entry(fhr).or_insert(obs);
            }
        }
        map
    }

    /// Observations keyed by valid time, in chronological order.
    pub fn by_valid_time(&self) -> BTreeMap<DateTime<Utc>, &Observation> {
        let mut map = BTreeMap::new();
        for obs in &self.observations {
            map.entry(obs.valid_time).or_insert(obs);
        }
        map
    }

    pub fn at_forecast_hour(&self, fhr: i64) -> Option<&Observation> {
        self.observations
            .iter()
            .find(|obs| obs.forecast_hour == Some(fhr))
    }

    pub fn at_valid_time(&self, valid_time: &DateTime<Utc>) -> Option<&Observation> {
        self.observations
            .iter()
            .find(|obs| obs.valid_time == *valid_time)
    }

    /// Column of one attribute across all observations, in order.
    pub fn series(&self, attr: TrackAttribute) -> Vec<AttributeValue> {
        self.observations.iter().map(|obs| obs.attribute(attr)).collect()
    }

    /// Render the reading at `fhr` as a 19-field TC vitals record, the
    /// `fort.12` input of the GFDL tracker.
    ///
    /// Pressure is written in mb and the maximum wind in m/s. Fields the
    /// track does not know are filled with the usual `-9` placeholders.
    pub fn tcvitals_record(&self, fhr: i64) -> Option<String> {
        let obs = self.at_forecast_hour(fhr)?;

        let lat = format!(
            "{:03}{}",
            (obs.lat.abs() * 10.0).round() as i64,
            if obs.lat < 0.0 { 'S' } else { 'N' }
        );
        let lon = format!(
            "{:04}{}",
            (obs.lon.abs() * 10.0).round() as i64,
            if obs.lon < 0.0 { 'W' } else { 'E' }
        );
        let name: String = self
            .storm
            .name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        let stamp = format_compact(&obs.valid_time, CompactFormat::Minute);

        Some(format!(
            "{:<4} {} {:<9} {} {} {} {} -99 -99 {:04} -999 -999 {:02} -99 -999 -999 -999 -999 X",
            self.storm.center,
            self.storm.storm_id(),
            name,
            &stamp[0..8],
            &stamp[8..12],
            lat,
            lon,
            obs.mslp.round() as i64,
            knots_to_mps(obs.max_wind).round() as i64,
        ))
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Collects observations while a file is parsed, then produces the
/// immutable [`Track`].
///
/// If no reference time is set explicitly, the first observation's
/// reference time is used.
#[derive(Debug, Default)]
pub struct TrackBuilder {
    reference_time: Option<DateTime<Utc>>,
    storm: StormInfo,
    observations: Vec<Observation>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    pub fn with_storm(mut self, storm: StormInfo) -> Self {
        self.storm = storm;
        self
    }

    /// Storm metadata, for parsers that learn it from the records.
    pub fn storm_mut(&mut self) -> &mut StormInfo {
        &mut self.storm
    }

    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn build(self) -> Track {
        let reference_time = self
            .reference_time
            .or_else(|| self.observations.first().map(|obs| obs.reference_time));
        Track {
            reference_time,
            storm: self.storm,
            observations: self.observations,
        }
    }
}
