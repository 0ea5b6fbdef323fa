//! Pairwise differencing of two tracks.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tc_common::time::pretty;
use tc_common::{great_circle_km, AttributeValue, Observation, Track, TrackAttribute};
use tracing::{debug, info, info_span};

use crate::metric::DiffMetric;
use crate::options::{Alignment, DiffOptions};
use crate::summary::DiffSummary;

/// Errors of track A relative to track B at one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffObservation {
    /// Forecast hour of the track A observation.
    pub forecast_hour: Option<i64>,
    /// Valid time of the track A observation.
    pub valid_time: DateTime<Utc>,
    /// Either source observation was flagged.
    pub flagged: bool,
    /// Great-circle distance between the two positions.
    pub track_error_km: f64,
    pub pressure_error_mb: f64,
    pub wind_error_kts: f64,
}

impl DiffObservation {
    pub fn metric(&self, metric: DiffMetric) -> f64 {
        match metric {
            DiffMetric::TrackError => self.track_error_km,
            DiffMetric::PressureError => self.pressure_error_mb,
            DiffMetric::WindError => self.wind_error_kts,
        }
    }

    /// Value of a rendering attribute. Pressure and wind map to their
    /// errors; position attributes have no counterpart. Use [`Self::metric`]
    /// for the track error.
    pub fn attribute(&self, attr: TrackAttribute) -> Option<AttributeValue> {
        match attr {
            TrackAttribute::ForecastHour => Some(AttributeValue::Hour(self.forecast_hour)),
            TrackAttribute::MaxWind => Some(AttributeValue::Number(self.wind_error_kts)),
            TrackAttribute::Mslp => Some(AttributeValue::Number(self.pressure_error_mb)),
            TrackAttribute::Flagged => Some(AttributeValue::Flag(self.flagged)),
            TrackAttribute::ForecastDate => Some(AttributeValue::Time(self.valid_time)),
            TrackAttribute::Lat | TrackAttribute::Lon => None,
        }
    }
}

impl fmt::Display for DiffObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "flagged: {}, track error: {:.2}, maxwind error: {:.2}, mslp error: {:.2}",
            self.flagged, self.track_error_km, self.wind_error_kts, self.pressure_error_mb
        )
    }
}

/// Why an observation of track A has no diff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Track B has nothing at the aligned time.
    MissingCorrespondingEntry,
    /// One side is flagged and flagged pairs were excluded.
    Flagged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCorrespondingEntry => write!(f, "no corresponding entry"),
            SkipReason::Flagged => write!(f, "flagged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub forecast_hour: Option<i64>,
    pub valid_time: DateTime<Utc>,
    pub reason: SkipReason,
}

/// The difference of two tracks. Computed once by [`compute_diff`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDiff {
    reference_time: Option<DateTime<Utc>>,
    entries: Vec<DiffObservation>,
    skipped: Vec<SkippedEntry>,
}

impl TrackDiff {
    /// Reference time of track A.
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    pub fn entries(&self) -> &[DiffObservation] {
        &self.entries
    }

    /// Track A observations that produced no entry, in track order.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffObservation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column of one attribute. Empty for position attributes.
    pub fn series(&self, attr: TrackAttribute) -> Vec<AttributeValue> {
        self.entries
            .iter()
            .filter_map(|entry| entry.attribute(attr))
            .collect()
    }

    /// Column of one error, in entry order.
    pub fn metric_series(&self, metric: DiffMetric) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.metric(metric)).collect()
    }

    /// `(forecast hour, error)` pairs for plotting an error against lead
    /// time. Entries without a forecast hour are left out.
    pub fn metric_by_forecast_hour(&self, metric: DiffMetric) -> Vec<(i64, f64)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.forecast_hour.map(|fhr| (fhr, entry.metric(metric))))
            .collect()
    }

    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_diff(self)
    }
}

impl<'a> IntoIterator for &'a TrackDiff {
    type Item = &'a DiffObservation;
    type IntoIter = std::slice::Iter<'a, DiffObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Counterpart lookup for the chosen alignment.
enum Counterparts<'t> {
    ByValidEpoch(HashMap<i64, &'t Observation>),
    ByForecastHour(HashMap<i64, &'t Observation>),
}

impl<'t> Counterparts<'t> {
    fn new(track: &'t Track, alignment: Alignment) -> Self {
        match alignment {
            Alignment::ValidTime => Counterparts::ByValidEpoch(track.by_valid_epoch()),
            Alignment::ForecastHour => Counterparts::ByForecastHour(track.by_forecast_hour()),
        }
    }

    fn find(&self, obs: &Observation) -> Option<&'t Observation> {
        match self {
            Counterparts::ByValidEpoch(map) => map.get(&obs.valid_epoch()).copied(),
            Counterparts::ByForecastHour(map) => {
                obs.forecast_hour.and_then(|fhr| map.get(&fhr).copied())
            }
        }
    }
}

/// Compare track `a` against track `b`, one entry per observation of `a`
/// that has a counterpart in `b`.
///
/// Position error is the great-circle distance. Pressure and wind errors are
/// `options.combine(a, b)`, subtraction unless overridden.
pub fn compute_diff(a: &Track, b: &Track, options: &DiffOptions) -> TrackDiff {
    let _span = info_span!(
        "compute_diff",
        alignment = %options.alignment,
        a_len = a.len(),
        b_len = b.len()
    )
    .entered();

    let counterparts = Counterparts::new(b, options.alignment);
    let mut entries = Vec::with_capacity(a.len());
    let mut skipped = Vec::new();

    for one in a {
        let skip = |reason| SkippedEntry {
            forecast_hour: one.forecast_hour,
            valid_time: one.valid_time,
            reason,
        };

        let Some(two) = counterparts.find(one) else {
            match options.alignment {
                Alignment::ValidTime => debug!(
                    time = %pretty(&one.valid_time),
                    "Second track has no corresponding entry at this time"
                ),
                Alignment::ForecastHour => debug!(
                    fhr = ?one.forecast_hour,
                    "Second track has no corresponding entry for this forecast hour"
                ),
            }
            skipped.push(skip(SkipReason::MissingCorrespondingEntry));
            continue;
        };

        let flagged = one.flagged || two.flagged;
        if flagged && !options.include_flagged {
            debug!(time = %pretty(&one.valid_time), "Skipping flagged pair");
            skipped.push(skip(SkipReason::Flagged));
            continue;
        }

        let mut pressure = (options.combine)(one.mslp, two.mslp);
        let mut wind = (options.combine)(one.max_wind, two.max_wind);
        if options.absolute {
            pressure = pressure.abs();
            wind = wind.abs();
        }

        entries.push(DiffObservation {
            forecast_hour: one.forecast_hour,
            valid_time: one.valid_time,
            flagged,
            track_error_km: great_circle_km(one.lat, one.lon, two.lat, two.lon),
            pressure_error_mb: pressure,
            wind_error_kts: wind,
        });
    }

    info!(
        entries = entries.len(),
        skipped = skipped.len(),
        "Computed track difference"
    );

    TrackDiff {
        reference_time: a.reference_time(),
        entries,
        skipped,
    }
}
