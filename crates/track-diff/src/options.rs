//! Options for comparing two tracks.

use std::fmt;
use std::str::FromStr;

/// How observations of the two tracks are paired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Pair observations valid at the same absolute time.
    #[default]
    ValidTime,
    /// Pair observations at the same forecast hour, regardless of the
    /// tracks' reference times.
    ForecastHour,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::ValidTime => write!(f, "valid-time"),
            Alignment::ForecastHour => write!(f, "forecast-hour"),
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "valid-time" | "valid_time" | "absolute" => Ok(Alignment::ValidTime),
            "forecast-hour" | "forecast_hour" | "fhr" | "lead-time" => {
                Ok(Alignment::ForecastHour)
            }
            other => Err(format!("Unknown alignment: {}", other)),
        }
    }
}

/// Default operator: forecast minus reference.
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Options for [`compute_diff`](crate::compute_diff).
#[derive(Debug, Clone, Copy)]
pub struct DiffOptions {
    pub alignment: Alignment,
    /// Applied as `combine(a, b)` to pressure and wind.
    pub combine: fn(f64, f64) -> f64,
    /// Keep pairs where either side is flagged. The result is marked flagged.
    pub include_flagged: bool,
    /// Report the magnitude of the pressure and wind errors.
    pub absolute: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            alignment: Alignment::ValidTime,
            combine: subtract,
            include_flagged: true,
            absolute: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DiffOptions::default();
        assert_eq!(options.alignment, Alignment::ValidTime);
        assert!(options.include_flagged);
        assert!(!options.absolute);
        assert_eq!((options.combine)(1000.0, 990.0), 10.0);
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("fhr".parse::<Alignment>().unwrap(), Alignment::ForecastHour);
        assert_eq!("Valid-Time".parse::<Alignment>().unwrap(), Alignment::ValidTime);
        assert!("sideways".parse::<Alignment>().is_err());
    }
}
