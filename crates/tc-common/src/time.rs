//! Time handling for tracker records.
//!
//! Tracker files stamp their records with fixed-width calendar strings
//! (`YYYYMMDDHH`, `YYYYMMDDHHMM`, `YYYYMMDDHHMMSS`). Every conversion here is
//! UTC: there is no local time and no DST adjustment.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in one forecast hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Fixed-width compact timestamp layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompactFormat {
    /// `YYYYMMDDHH`
    Hour,
    /// `YYYYMMDDHHMM`
    Minute,
    /// `YYYYMMDDHHMMSS`
    Second,
}

impl CompactFormat {
    /// Number of characters in this layout.
    pub fn width(&self) -> usize {
        match self {
            CompactFormat::Hour => 10,
            CompactFormat::Minute => 12,
            CompactFormat::Second => 14,
        }
    }

    /// Pick the layout matching a string width.
    pub fn from_width(width: usize) -> Option<Self> {
        match width {
            10 => Some(CompactFormat::Hour),
            12 => Some(CompactFormat::Minute),
            14 => Some(CompactFormat::Second),
            _ => None,
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            CompactFormat::Hour => "%Y%m%d%H",
            CompactFormat::Minute => "%Y%m%d%H%M",
            CompactFormat::Second => "%Y%m%d%H%M%S",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("Malformed timestamp '{value}': {reason}")]
    Malformed { value: String, reason: String },

    #[error("Epoch {0} is outside the representable range")]
    OutOfRange(i64),
}

impl TimeParseError {
    fn malformed(value: &str, reason: impl Into<String>) -> Self {
        TimeParseError::Malformed {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a compact timestamp, choosing the layout from its width.
pub fn parse_compact(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();
    let format = CompactFormat::from_width(s.len())
        .ok_or_else(|| TimeParseError::malformed(s, "expected 10, 12 or 14 digits"))?;
    parse_compact_as(s, format)
}

/// Parse a compact timestamp that must have exactly the given layout.
pub fn parse_compact_as(s: &str, format: CompactFormat) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();
    if s.len() != format.width() {
        return Err(TimeParseError::malformed(
            s,
            format!("expected {} digits", format.width()),
        ));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::malformed(s, "non-numeric characters"));
    }

    // All bytes are ASCII digits, so slicing and parsing cannot fail.
    let field = |range: std::ops::Range<usize>| -> u32 {
        s[range].bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };

    let year = field(0..4) as i32;
    let month = field(4..6);
    let day = field(6..8);
    let hour = field(8..10);
    let minute = if s.len() >= 12 { field(10..12) } else { 0 };
    let second = if s.len() >= 14 { field(12..14) } else { 0 };

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| TimeParseError::malformed(s, "not a valid calendar time"))?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Parse a `YYYY/MM/DD` date and `HH:MM` time pair, as written by the
/// GEOS-5 nature-run tracker.
pub fn parse_slash_datetime(date: &str, time: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let value = format!("{} {}", date, time);
    let numbers = |s: &str, sep: char, count: usize| -> Option<Vec<u32>> {
        let parts: Option<Vec<u32>> = s.trim().split(sep).map(|p| p.parse().ok()).collect();
        parts.filter(|p| p.len() == count)
    };

    let ymd = numbers(date, '/', 3)
        .ok_or_else(|| TimeParseError::malformed(&value, "expected YYYY/MM/DD"))?;
    let hm = numbers(time, ':', 2)
        .ok_or_else(|| TimeParseError::malformed(&value, "expected HH:MM"))?;

    let naive = NaiveDate::from_ymd_opt(ymd[0] as i32, ymd[1], ymd[2])
        .and_then(|d| d.and_hms_opt(hm[0], hm[1], 0))
        .ok_or_else(|| TimeParseError::malformed(&value, "not a valid calendar time"))?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Parse a compact timestamp straight to epoch seconds.
pub fn compact_to_epoch(s: &str) -> Result<i64, TimeParseError> {
    parse_compact(s).map(|dt| dt.timestamp())
}

/// Render a datetime in a compact layout.
pub fn format_compact(dt: &DateTime<Utc>, format: CompactFormat) -> String {
    dt.format(format.pattern()).to_string()
}

/// Convert epoch seconds to a UTC datetime.
pub fn from_epoch(epoch: i64) -> Result<DateTime<Utc>, TimeParseError> {
    Utc.timestamp_opt(epoch, 0)
        .single()
        .ok_or(TimeParseError::OutOfRange(epoch))
}

/// Render epoch seconds in a compact layout.
pub fn epoch_to_compact(epoch: i64, format: CompactFormat) -> Result<String, TimeParseError> {
    from_epoch(epoch).map(|dt| format_compact(&dt, format))
}

/// Human-readable stamp used in log messages, e.g. `2005-08-01 06:00Z`.
pub fn pretty(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%MZ").to_string()
}

/// Whole hours from `start` to `end`, rounded toward negative infinity.
pub fn hours_between(start: &DateTime<Utc>, end: &DateTime<Utc>) -> i64 {
    (*end - *start).num_seconds().div_euclid(SECONDS_PER_HOUR)
}
