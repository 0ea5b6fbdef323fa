//! Per-observation acceptance rules shared by the parsers.

use std::fmt;

use tc_common::Observation;
use tracing::{debug, info};

use crate::error::Result;
use crate::options::ParseOptions;

/// Why an otherwise well-formed observation was left out of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BeyondDuration,
    OutOfBounds,
    OverLand,
    Flagged,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::BeyondDuration => "after the requested forecast duration",
            Rejection::OutOfBounds => "outside the requested bounds",
            Rejection::OverLand => "over land",
            Rejection::Flagged => "flagged by the tracker",
        };
        f.write_str(reason)
    }
}

/// Applies duration, bounds, land and flag rules, in that order.
pub struct ObservationFilter<'a> {
    options: &'a ParseOptions,
    max_forecast_hour: Option<i64>,
}

impl<'a> ObservationFilter<'a> {
    /// Validates the options and builds the filter.
    pub fn new(options: &'a ParseOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            max_forecast_hour: options.max_forecast_hour(),
        })
    }

    /// True if a reading at `hours` since the reference time is past the
    /// requested duration.
    pub fn beyond_duration(&self, hours: i64) -> bool {
        self.max_forecast_hour.is_some_and(|max| hours > max)
    }

    pub fn check(&self, obs: &Observation) -> Option<Rejection> {
        if self.beyond_duration(obs.elapsed_hours()) {
            return Some(Rejection::BeyondDuration);
        }

        if let Some(bounds) = &self.options.bounds {
            if !bounds.contains(obs.lat, obs.lon) {
                return Some(Rejection::OutOfBounds);
            }
        }

        if self.options.skip_land_points {
            if let Some(mask) = &self.options.land_mask {
                if mask.is_land(obs.lon, obs.lat) {
                    return Some(Rejection::OverLand);
                }
            }
        }

        if obs.flagged && !self.options.include_flagged {
            return Some(Rejection::Flagged);
        }

        None
    }

    /// Check an observation and log the reason when it is rejected.
    pub fn admit(&self, obs: &Observation) -> bool {
        match self.check(obs) {
            None => true,
            Some(Rejection::Flagged) => {
                debug!(observation = %obs, "Skipping flagged entry");
                false
            }
            Some(reason) => {
                info!(
                    lat = obs.lat,
                    lon = obs.lon,
                    hours = obs.elapsed_hours(),
                    "Skipping tracker entry {}",
                    reason
                );
                false
            }
        }
    }
}
