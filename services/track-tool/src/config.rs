//! Command-line and environment configuration.
//!
//! Flags fall back to `TRACK_TOOL_*` environment variables (a `.env` file is
//! loaded first). Parser filter defaults come from the `ATCF_*` variables
//! read by [`ParseOptions::from_env`].

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use atcf_parser::{duration_from_hours, DetectOptions, ParseOptions, TrackFormat};
use chrono::{DateTime, Utc};
use clap::Args;
use tc_common::time::parse_compact;
use tc_common::TrackBounds;
use track_diff::{Alignment, DiffOptions};

fn parse_start_date(value: &str) -> Result<DateTime<Utc>, String> {
    parse_compact(value).map_err(|e| e.to_string())
}

fn parse_duration_hours(value: &str) -> Result<Duration, String> {
    let hours: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number of hours", value))?;
    duration_from_hours(hours).ok_or_else(|| format!("{} hours is too long", hours))
}

/// Options shared by every command that reads a track.
#[derive(Args, Debug, Clone, Default)]
pub struct ParseArgs {
    /// Track format; detected from the file when omitted
    #[arg(long, env = "TRACK_TOOL_FORMAT")]
    pub format: Option<TrackFormat>,

    /// Storm id (e.g. 09L), needed for b-decks and SYNDAT
    #[arg(long, env = "TRACK_TOOL_STORM_ID")]
    pub storm_id: Option<String>,

    /// Experiment start date as YYYYMMDDHH, needed for b-decks and SYNDAT
    #[arg(long, env = "TRACK_TOOL_START_DATE", value_parser = parse_start_date)]
    pub start_date: Option<DateTime<Utc>>,

    /// Keep readings the tracker flagged
    #[arg(long, env = "TRACK_TOOL_INCLUDE_FLAGGED")]
    pub include_flagged: bool,

    /// Drop readings after this many forecast hours
    #[arg(
        long = "duration-hours",
        env = "TRACK_TOOL_DURATION_HOURS",
        value_parser = parse_duration_hours
    )]
    pub duration: Option<Duration>,

    /// Keep readings within north,south,west,east (empty edges are open)
    #[arg(long, env = "TRACK_TOOL_BOUNDS", allow_hyphen_values = true)]
    pub bounds: Option<TrackBounds>,

    /// File of forecast hours to flag (GFDL tracker only)
    #[arg(long, env = "TRACK_TOOL_FLAGGED_HOURS_FILE")]
    pub flagged_hours_file: Option<PathBuf>,

    /// Fail instead of returning an empty track
    #[arg(long, env = "TRACK_TOOL_STRICT")]
    pub strict: bool,
}

impl ParseArgs {
    /// Combine the flags with the `ATCF_*` environment defaults.
    pub fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::from_env();
        if self.include_flagged {
            options.include_flagged = true;
        }
        if let Some(duration) = self.duration {
            options.duration = Some(duration);
        }
        if let Some(bounds) = self.bounds {
            options.bounds = Some(bounds);
        }
        if let Some(file) = &self.flagged_hours_file {
            options.flagged_hours_file = Some(file.clone());
        }
        if self.strict {
            options.strict = true;
        }
        options
    }

    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions {
            storm_id: self.storm_id.clone(),
            start_date: self.start_date,
            format: self.format,
            parse: self.parse_options(),
        }
    }
}

/// Options of the `diff` command.
#[derive(Args, Debug, Clone, Default)]
pub struct DiffArgs {
    /// Pair readings by forecast hour instead of valid time
    #[arg(long, env = "TRACK_TOOL_LEAD_TIME")]
    pub lead_time: bool,

    /// Report absolute pressure and wind errors
    #[arg(long, env = "TRACK_TOOL_ABSOLUTE")]
    pub absolute: bool,

    /// Leave out pairs where either reading is flagged
    #[arg(long, env = "TRACK_TOOL_EXCLUDE_FLAGGED")]
    pub exclude_flagged: bool,

    /// Format of the reference track; detected from the file when omitted
    #[arg(long, env = "TRACK_TOOL_REFERENCE_FORMAT")]
    pub reference_format: Option<TrackFormat>,
}

impl DiffArgs {
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            alignment: if self.lead_time {
                Alignment::ForecastHour
            } else {
                Alignment::ValidTime
            },
            include_flagged: !self.exclude_flagged,
            absolute: self.absolute,
            ..Default::default()
        }
    }

    /// Options for reading the reference track.
    ///
    /// `--format` applies to the forecast only. A b-deck or SYNDAT reference
    /// without an explicit start date is read relative to the forecast's
    /// reference time.
    pub fn reference_options(
        &self,
        parse: &ParseArgs,
        forecast_reference: Option<DateTime<Utc>>,
    ) -> DetectOptions {
        let mut options = parse.detect_options();
        options.format = self.reference_format;
        if options.start_date.is_none() {
            options.start_date = forecast_reference;
        }
        options
    }
}

/// Validate a forecast hour given on the command line.
pub fn validate_forecast_hour(fhr: i64) -> Result<i64> {
    if fhr < 0 {
        bail!("forecast hour must not be negative, got {}", fhr);
    }
    Ok(fhr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_date() {
        assert!(parse_start_date("2012082600").is_ok());
        assert!(parse_start_date("20120826").is_err());
    }

    #[test]
    fn test_parse_options_from_flags() {
        let args = ParseArgs {
            include_flagged: true,
            duration: parse_duration_hours("72").ok(),
            bounds: Some(TrackBounds::new(40.0, 10.0, -100.0, -60.0)),
            ..Default::default()
        };
        let options = args.parse_options();
        assert!(options.include_flagged);
        assert_eq!(options.max_forecast_hour(), Some(72));
        assert!(options.bounds.is_some());
    }

    #[test]
    fn test_duration_hours_overflow_is_rejected() {
        assert_eq!(
            parse_duration_hours("6").unwrap(),
            Duration::from_secs(6 * 3600)
        );
        assert!(parse_duration_hours(&(u64::MAX / 1000).to_string()).is_err());
        assert!(parse_duration_hours("-6").is_err());
        assert!(parse_duration_hours("six").is_err());
    }

    #[test]
    fn test_duration_hours_from_command_line() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[command(flatten)]
            parse: ParseArgs,
        }

        let cli = Cli::try_parse_from(["track-tool", "--duration-hours", "48"]).unwrap();
        assert_eq!(cli.parse.parse_options().max_forecast_hour(), Some(48));

        let huge = (u64::MAX / 1000).to_string();
        assert!(Cli::try_parse_from(["track-tool", "--duration-hours", huge.as_str()]).is_err());
    }

    #[test]
    fn test_forecast_format_does_not_apply_to_reference() {
        let parse = ParseArgs {
            format: Some(TrackFormat::Gfdl),
            storm_id: Some("09L".to_string()),
            ..Default::default()
        };

        let options = DiffArgs::default().reference_options(&parse, None);
        assert_eq!(options.format, None);
        assert_eq!(options.storm_id.as_deref(), Some("09L"));
        assert_eq!(parse.detect_options().format, Some(TrackFormat::Gfdl));
    }

    #[test]
    fn test_diff_options() {
        let args = DiffArgs {
            lead_time: true,
            exclude_flagged: true,
            ..Default::default()
        };
        let options = args.diff_options();
        assert_eq!(options.alignment, Alignment::ForecastHour);
        assert!(!options.include_flagged);
        assert!(!options.absolute);
        assert_eq!(DiffArgs::default().diff_options().alignment, Alignment::ValidTime);
    }

    #[test]
    fn test_reference_start_falls_back_to_forecast() {
        let forecast_start = parse_compact("2012082600").unwrap();
        let args = DiffArgs {
            reference_format: Some(TrackFormat::BDeck),
            ..Default::default()
        };

        let options = args.reference_options(&ParseArgs::default(), Some(forecast_start));
        assert_eq!(options.start_date, Some(forecast_start));
        assert_eq!(options.format, Some(TrackFormat::BDeck));

        let explicit = ParseArgs {
            start_date: Some(parse_compact("2012082518").unwrap()),
            ..Default::default()
        };
        let options = args.reference_options(&explicit, Some(forecast_start));
        assert_eq!(options.start_date, explicit.start_date);
    }

    #[test]
    fn test_validate_forecast_hour() {
        assert_eq!(validate_forecast_hour(6).unwrap(), 6);
        assert!(validate_forecast_hour(-6).is_err());
    }
}
