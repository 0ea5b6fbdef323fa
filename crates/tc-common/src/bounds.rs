//! North/south/west/east limits for filtering track positions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::geo::normalize_lon;

/// Geographic limits for accepting an observation.
///
/// Every edge is optional; an absent edge does not filter. Latitudes are
/// compared directly. Longitudes are wrapped into [-180, 180) first, so
/// tracks written in 0–360 degrees east are handled. When both `west` and
/// `east` are set and `west > east` the box crosses the antimeridian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackBounds {
    pub north: Option<f64>,
    pub south: Option<f64>,
    pub west: Option<f64>,
    pub east: Option<f64>,
}

impl TrackBounds {
    pub fn new(north: f64, south: f64, west: f64, east: f64) -> Self {
        Self {
            north: Some(north),
            south: Some(south),
            west: Some(west),
            east: Some(east),
        }
    }

    /// True if no edge is set.
    pub fn is_unbounded(&self) -> bool {
        self.north.is_none() && self.south.is_none() && self.west.is_none() && self.east.is_none()
    }

    /// Check whether a position lies within the limits (edges inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        if let Some(n) = self.north {
            if lat > n {
                return false;
            }
        }
        if let Some(s) = self.south {
            if lat < s {
                return false;
            }
        }

        let lon = normalize_lon(lon);
        match (self.west.map(normalize_lon), self.east.map(normalize_lon)) {
            (Some(w), Some(e)) if w <= e => lon >= w && lon <= e,
            (Some(w), Some(e)) => lon >= w || lon <= e,
            (Some(w), None) => lon >= w,
            (None, Some(e)) => lon <= e,
            (None, None) => true,
        }
    }
}

/// Parses `"N,S,W,E"`. An empty field, `-` or `none` leaves that edge open.
impl FromStr for TrackBounds {
    type Err = BoundsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BoundsParseError::InvalidFormat(s.to_string()));
        }

        let edge = |part: &str| -> Result<Option<f64>, BoundsParseError> {
            if part.is_empty() || part == "-" || part.eq_ignore_ascii_case("none") {
                return Ok(None);
            }
            part.parse()
                .map(Some)
                .map_err(|_| BoundsParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self {
            north: edge(parts[0])?,
            south: edge(parts[1])?,
            west: edge(parts[2])?,
            east: edge(parts[3])?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsParseError {
    #[error("Invalid bounds format: {0}. Expected 'north,south,west,east'")]
    InvalidFormat(String),

    #[error("Invalid number in bounds: {0}")]
    InvalidNumber(String),
}
