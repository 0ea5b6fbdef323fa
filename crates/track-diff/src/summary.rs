//! Aggregate statistics over a [`TrackDiff`].

use serde::{Deserialize, Serialize};

use crate::diff::{SkipReason, TrackDiff};
use crate::metric::DiffMetric;

/// Counts and mean absolute errors of a track difference.
///
/// Means are `None` when there are no entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub compared: usize,
    pub flagged: usize,
    pub skipped_missing: usize,
    pub skipped_flagged: usize,
    pub mean_track_error_km: Option<f64>,
    pub max_track_error_km: Option<f64>,
    pub mean_abs_pressure_error_mb: Option<f64>,
    pub mean_abs_wind_error_kts: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

impl DiffSummary {
    pub fn from_diff(diff: &TrackDiff) -> Self {
        let entries = diff.entries();
        let track_errors = diff.metric_series(DiffMetric::TrackError);
        let abs_errors =
            |metric: DiffMetric| mean(diff.metric_series(metric).into_iter().map(f64::abs));
        let skipped_with = |reason: SkipReason| {
            diff.skipped()
                .iter()
                .filter(|entry| entry.reason == reason)
                .count()
        };

        Self {
            compared: entries.len(),
            flagged: entries.iter().filter(|e| e.flagged).count(),
            skipped_missing: skipped_with(SkipReason::MissingCorrespondingEntry),
            skipped_flagged: skipped_with(SkipReason::Flagged),
            mean_track_error_km: mean(track_errors.iter().copied()),
            max_track_error_km: track_errors
                .iter()
                .copied()
                .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v)))),
            mean_abs_pressure_error_mb: abs_errors(DiffMetric::PressureError),
            mean_abs_wind_error_kts: abs_errors(DiffMetric::WindError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean([1.0, 2.0, 6.0].into_iter()), Some(3.0));
        assert_eq!(mean(std::iter::empty()), None);
    }
}
