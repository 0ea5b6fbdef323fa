//! Generators for synthetic tracks and tracker records.
//!
//! These produce predictable storms that move a fixed distance and deepen a
//! fixed amount every step, so expected differences are easy to compute.

use chrono::{DateTime, Utc};
use tc_common::{Observation, StormInfo, Track, TrackBuilder};

/// Parameters of a storm moving in a straight line.
#[derive(Debug, Clone, Copy)]
pub struct LinearStorm {
    pub lat: f64,
    pub lon: f64,
    pub mslp: f64,
    pub max_wind: f64,
    /// Change per hour of (lat, lon).
    pub motion: (f64, f64),
    /// Change per hour of (mslp, max wind).
    pub trend: (f64, f64),
}

impl Default for LinearStorm {
    fn default() -> Self {
        Self {
            lat: 23.0,
            lon: -78.0,
            mslp: 995.0,
            max_wind: 55.0,
            motion: (0.1, -0.25),
            trend: (-0.5, 1.0),
        }
    }
}

impl LinearStorm {
    /// Observation of the storm `fhr` hours after `start`.
    pub fn at(&self, start: DateTime<Utc>, fhr: i64) -> Observation {
        let h = fhr as f64;
        Observation::at_forecast_hour(start, fhr)
            .with_position(self.lat + self.motion.0 * h, self.lon + self.motion.1 * h)
            .with_intensity(self.mslp + self.trend.0 * h, self.max_wind + self.trend.1 * h)
    }

    /// Track with one observation per entry of `hours`.
    pub fn track(&self, start: DateTime<Utc>, hours: &[i64]) -> Track {
        let mut builder = TrackBuilder::new()
            .with_reference_time(start)
            .with_storm(StormInfo {
                center: "TEST".to_string(),
                name: "LINEAR".to_string(),
                number: 9,
                basin: "AL".to_string(),
            });
        for &fhr in hours {
            builder.push(self.at(start, fhr));
        }
        builder.build()
    }

    /// Same track with the observations at `flagged_hours` marked flagged.
    pub fn track_with_flags(
        &self,
        start: DateTime<Utc>,
        hours: &[i64],
        flagged_hours: &[i64],
    ) -> Track {
        let mut builder = TrackBuilder::new().with_reference_time(start);
        for &fhr in hours {
            builder.push(self.at(start, fhr).with_flag(flagged_hours.contains(&fhr)));
        }
        builder.build()
    }
}

/// Encode a latitude as an ATCF `DDDH` token, e.g. `230N`.
pub fn atcf_lat(lat: f64) -> String {
    let hemisphere = if lat < 0.0 { 'S' } else { 'N' };
    format!("{}{}", (lat.abs() * 10.0).round() as i64, hemisphere)
}

/// Encode a longitude as an ATCF `DDDH` token, e.g. `780W`.
pub fn atcf_lon(lon: f64) -> String {
    let hemisphere = if lon < 0.0 { 'W' } else { 'E' };
    format!("{}{}", (lon.abs() * 10.0).round() as i64, hemisphere)
}

/// One Diapost line.
pub fn diapost_line(start: &str, fhr: i64, flagged: bool, obs: &Observation) -> String {
    format!(
        "{} {} 0 {} {} {} {} {}",
        start,
        fhr,
        u8::from(flagged),
        obs.lon,
        obs.lat,
        obs.mslp,
        obs.max_wind
    )
}

/// One `fort.69` record (20 fields, hour in hundredths).
pub fn fort69_line(start: &str, fhr: i64, obs: &Observation) -> String {
    format!(
        "AL, 09, {}, 03, HWRF, {:05}, {}, {}, {}, {}, XX, 34, NEQ, 0, 0, 0, 0, 1009, 250, 30",
        start,
        fhr * 100,
        atcf_lat(obs.lat),
        atcf_lon(obs.lon),
        obs.max_wind.round() as i64,
        obs.mslp.round() as i64
    )
}

/// Diapost file body for a linear storm.
pub fn diapost_track(storm: &LinearStorm, start: &str, hours: &[i64]) -> String {
    let reference = tc_common::time::parse_compact(start).expect("valid start date");
    hours
        .iter()
        .map(|&fhr| diapost_line(start, fhr, false, &storm.at(reference, fhr)) + "\n")
        .collect()
}
