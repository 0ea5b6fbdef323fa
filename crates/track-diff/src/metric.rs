//! Error columns of a track difference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the per-time errors carried by a [`crate::DiffObservation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffMetric {
    /// Great-circle position error (km).
    TrackError,
    /// Central pressure error (mb).
    PressureError,
    /// Maximum wind error (kts).
    WindError,
}

impl DiffMetric {
    pub fn all() -> &'static [DiffMetric] {
        &[
            DiffMetric::TrackError,
            DiffMetric::PressureError,
            DiffMetric::WindError,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiffMetric::TrackError => "track_error",
            DiffMetric::PressureError => "mslp_error",
            DiffMetric::WindError => "maxwind_error",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            DiffMetric::TrackError => "km",
            DiffMetric::PressureError => "mb",
            DiffMetric::WindError => "kts",
        }
    }
}

impl fmt::Display for DiffMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiffMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "track_error" | "track" => Ok(DiffMetric::TrackError),
            "mslp_error" | "pressure_error" | "mslp" => Ok(DiffMetric::PressureError),
            "maxwind_error" | "wind_error" | "maxwind" => Ok(DiffMetric::WindError),
            other => Err(format!("Unknown diff metric: {}", other)),
        }
    }
}
