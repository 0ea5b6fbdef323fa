//! Track-to-track error statistics.
//!
//! [`compute_diff`] pairs the observations of a forecast track with those
//! of a reference track, by valid time or by forecast hour, and reports the
//! great-circle position error and the pressure and wind errors at each
//! paired time.

pub mod diff;
pub mod metric;
pub mod options;
pub mod summary;

pub use diff::{compute_diff, DiffObservation, SkipReason, SkippedEntry, TrackDiff};
pub use metric::DiffMetric;
pub use options::{subtract, Alignment, DiffOptions};
pub use summary::DiffSummary;
