//! Common types shared by the track parsers and the track differencer.

pub mod bounds;
pub mod geo;
pub mod time;
pub mod track;
pub mod units;

pub use bounds::{BoundsParseError, TrackBounds};
pub use geo::{great_circle_km, LandMask};
pub use time::{CompactFormat, TimeParseError};
pub use track::{AttributeValue, Observation, StormInfo, Track, TrackAttribute, TrackBuilder};
