//! Options shared by every track parser.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tc_common::{LandMask, TrackBounds};
use tracing::warn;

use crate::error::{AtcfError, Result};

/// Filtering and strictness options for a parse.
///
/// The defaults drop flagged readings, keep the whole forecast, apply no
/// spatial filter and return an empty track rather than an error when no
/// record could be used.
#[derive(Clone, Default)]
pub struct ParseOptions {
    /// Keep readings the tracker flagged as unreliable.
    pub include_flagged: bool,
    /// Drop readings whose forecast hour is past this length of forecast.
    pub duration: Option<Duration>,
    /// Drop readings outside these limits.
    pub bounds: Option<TrackBounds>,
    /// Drop readings over land. Requires `land_mask`.
    pub skip_land_points: bool,
    pub land_mask: Option<Arc<dyn LandMask>>,
    /// Newline-separated forecast hours to force-flag.
    /// Only read by the GFDL tracker parser.
    pub flagged_hours_file: Option<PathBuf>,
    /// Fail with `UnrecognizedFormat` when no record could be used.
    pub strict: bool,
}

/// Forecast length of `hours`, or `None` if it overflows.
pub fn duration_from_hours(hours: u64) -> Option<Duration> {
    hours.checked_mul(3600).map(Duration::from_secs)
}

impl fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("include_flagged", &self.include_flagged)
            .field("duration", &self.duration)
            .field("bounds", &self.bounds)
            .field("skip_land_points", &self.skip_land_points)
            .field("land_mask", &self.land_mask.as_ref().map(|_| "<LandMask>"))
            .field("flagged_hours_file", &self.flagged_hours_file)
            .field("strict", &self.strict)
            .finish()
    }
}

impl ParseOptions {
    /// Load options from environment variables.
    ///
    /// Recognized: `ATCF_INCLUDE_FLAGGED`, `ATCF_DURATION_HOURS`,
    /// `ATCF_BOUNDS` (`N,S,W,E`), `ATCF_FLAGGED_HOURS_FILE`, `ATCF_STRICT`.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        let flag = |val: &str| val.to_lowercase() == "true" || val == "1";

        if let Ok(val) = std::env::var("ATCF_INCLUDE_FLAGGED") {
            options.include_flagged = flag(&val);
        }

        if let Ok(val) = std::env::var("ATCF_DURATION_HOURS") {
            match val.trim().parse::<u64>().ok().and_then(duration_from_hours) {
                Some(duration) => options.duration = Some(duration),
                None => warn!(value = %val, "Ignoring invalid ATCF_DURATION_HOURS"),
            }
        }

        if let Ok(val) = std::env::var("ATCF_BOUNDS") {
            if let Ok(bounds) = val.parse() {
                options.bounds = Some(bounds);
            }
        }

        if let Ok(val) = std::env::var("ATCF_FLAGGED_HOURS_FILE") {
            options.flagged_hours_file = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("ATCF_STRICT") {
            options.strict = flag(&val);
        }

        options
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<()> {
        if self.skip_land_points && self.land_mask.is_none() {
            return Err(AtcfError::MissingParameter(
                "land_mask is required when skip_land_points is set".to_string(),
            ));
        }
        Ok(())
    }

    /// Last forecast hour to keep, derived from `duration`.
    pub fn max_forecast_hour(&self) -> Option<i64> {
        self.duration.map(|d| (d.as_secs() / 3600) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(!options.include_flagged);
        assert!(!options.strict);
        assert!(options.max_forecast_hour().is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_land_skipping_needs_mask() {
        let options = ParseOptions {
            skip_land_points: true,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(AtcfError::MissingParameter(_))));

        let options = ParseOptions {
            skip_land_points: true,
            land_mask: Some(Arc::new(|_lon: f64, _lat: f64| false)),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_duration_from_hours() {
        assert_eq!(duration_from_hours(6), Some(Duration::from_secs(6 * 3600)));
        assert_eq!(duration_from_hours(u64::MAX / 1000), None);
    }

    #[test]
    fn test_from_env_ignores_overflowing_duration() {
        std::env::set_var("ATCF_DURATION_HOURS", (u64::MAX / 1000).to_string());
        let options = ParseOptions::from_env();
        std::env::remove_var("ATCF_DURATION_HOURS");
        assert!(options.duration.is_none());
    }

    #[test]
    fn test_max_forecast_hour_truncates() {
        let options = ParseOptions {
            duration: Some(Duration::from_secs(5 * 3600 + 1800)),
            ..Default::default()
        };
        assert_eq!(options.max_forecast_hour(), Some(5));
    }
}
