//! Readers for tropical-cyclone tracker output.
//!
//! Every reader produces a [`tc_common::Track`]. Use [`parse_track`] to
//! detect the format from the file, or call a reader in [`formats`]
//! directly when the format is known.
//!
//! # Example
//!
//! ```no_run
//! use atcf_parser::{parse_track, DetectOptions};
//! use std::path::Path;
//!
//! let track = parse_track(Path::new("fort.69"), &DetectOptions::default())?;
//! for obs in &track {
//!     println!("{obs}");
//! }
//! # Ok::<(), atcf_parser::AtcfError>(())
//! ```

pub mod coords;
pub mod detect;
pub mod error;
pub mod filter;
pub mod formats;
pub mod options;
pub mod source;

pub use detect::{detect_format, parse_track, DetectOptions, DetectionRule, DETECTION_RULES};
pub use error::{AtcfError, RecordError, Result};
pub use filter::{ObservationFilter, Rejection};
pub use formats::{Delimiter, TrackFormat};
pub use options::{duration_from_hours, ParseOptions};
