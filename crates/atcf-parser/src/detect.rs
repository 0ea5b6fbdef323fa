//! Format detection and dispatch.
//!
//! Tracker files carry no header, so the format is guessed from the number
//! of fields on the first line, counted with each format's own delimiter.
//! Several formats could in principle share a field count; callers who know
//! the format should set [`DetectOptions::format`] and skip the guess.

use std::path::Path;

use chrono::{DateTime, Utc};
use tc_common::Track;
use tracing::{debug, info_span, warn};

use crate::error::{AtcfError, Result};
use crate::formats::{bdeck, diapost, geos5, gfdl, nolan, syndat, Delimiter, TrackFormat};
use crate::options::ParseOptions;
use crate::source;

/// Field counts that identify a format, under that format's delimiter.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub token_counts: &'static [usize],
    pub delimiter: Delimiter,
    pub format: TrackFormat,
}

impl DetectionRule {
    pub fn matches(&self, line: &str) -> bool {
        self.token_counts.contains(&self.delimiter.split(line).len())
    }
}

/// Rules in the order they are tried.
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        token_counts: &[13],
        delimiter: Delimiter::Whitespace,
        format: TrackFormat::Nolan,
    },
    DetectionRule {
        token_counts: &[gfdl::FORT69_TOKEN_COUNT, gfdl::FORT64_TOKEN_COUNT],
        delimiter: Delimiter::Comma,
        format: TrackFormat::Gfdl,
    },
    DetectionRule {
        token_counts: &[8],
        delimiter: Delimiter::Whitespace,
        format: TrackFormat::Diapost,
    },
    DetectionRule {
        token_counts: &[syndat::SHORT_TOKEN_COUNT, syndat::LONG_TOKEN_COUNT],
        delimiter: Delimiter::Whitespace,
        format: TrackFormat::Syndat,
    },
    DetectionRule {
        token_counts: &[16],
        delimiter: Delimiter::Whitespace,
        format: TrackFormat::Geos5,
    },
];

/// First rule matching a record line.
pub fn format_for_line(line: &str) -> Option<TrackFormat> {
    DETECTION_RULES
        .iter()
        .find(|rule| rule.matches(line))
        .map(|rule| rule.format)
}

/// Guess the format of a track file. A directory is taken to hold b-decks.
pub fn detect_format(path: &Path) -> Result<TrackFormat> {
    source::ensure_exists(path)?;

    if path.is_dir() {
        warn!(path = %path.display(), "Path is a directory, assuming it holds b-decks");
        return Ok(TrackFormat::BDeck);
    }

    let lines = source::read_lines(path)?;
    let first = lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| AtcfError::UnrecognizedFormat(format!("{} is empty", path.display())))?;

    let format = format_for_line(first).ok_or_else(|| {
        AtcfError::UnrecognizedFormat(format!(
            "{} whitespace-separated fields on the first line of {}",
            first.split_whitespace().count(),
            path.display()
        ))
    })?;

    debug!(format = %format, "Assuming format based on line length");
    Ok(format)
}

/// Options for [`parse_track`].
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Storm id such as `09L`. Required for b-decks and SYNDAT.
    pub storm_id: Option<String>,
    /// Experiment start date. Required for b-decks and SYNDAT.
    pub start_date: Option<DateTime<Utc>>,
    /// Skip detection and use this format.
    pub format: Option<TrackFormat>,
    pub parse: ParseOptions,
}

impl DetectOptions {
    fn require_storm_id(&self, format: TrackFormat) -> Result<&str> {
        self.storm_id.as_deref().ok_or_else(|| {
            AtcfError::MissingParameter(format!("{} tracks need a storm id", format))
        })
    }

    fn require_start_date(&self, format: TrackFormat) -> Result<DateTime<Utc>> {
        self.start_date.ok_or_else(|| {
            AtcfError::MissingParameter(format!("{} tracks need a start date", format))
        })
    }
}

/// Parse a track file of any supported format.
pub fn parse_track(path: &Path, options: &DetectOptions) -> Result<Track> {
    let _span = info_span!("parse_track", path = %path.display()).entered();

    source::ensure_exists(path)?;
    let format = match options.format {
        Some(format) => format,
        None => detect_format(path)?,
    };
    let parse = &options.parse;

    match format {
        TrackFormat::Diapost => diapost::parse(path, parse),
        TrackFormat::Gfdl => gfdl::parse(path, parse),
        TrackFormat::Nolan => nolan::parse(path, parse),
        TrackFormat::Geos5 => geos5::parse(path, parse),
        TrackFormat::Syndat => {
            let storm_id = options.require_storm_id(format)?;
            let start = options.require_start_date(format)?;
            syndat::parse(path, storm_id, start, parse)
        }
        TrackFormat::BDeck if path.is_dir() => {
            let storm_id = options.require_storm_id(format)?;
            let start = options.require_start_date(format)?;
            bdeck::parse_dir(path, storm_id, start, parse)
        }
        TrackFormat::BDeck => {
            let start = options.require_start_date(format)?;
            bdeck::parse(path, start, parse)
        }
    }
}
