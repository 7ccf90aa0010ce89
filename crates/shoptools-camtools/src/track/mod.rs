//! Toolpath synthesis
//!
//! Track layers are rebuilt from the workpiece on every render and live only
//! for the duration of that render.

pub mod builder;
pub mod feed;
pub mod kerf;
pub mod segment;
pub mod tools;

pub use builder::{TrackBuild, TrackBuilder};
pub use feed::{resolve_feed_rate, DEFAULT_FEED_RATE};
pub use segment::{TrackLayer, TrackSegment, TrackSegmentType};
pub use tools::{TrackTool, TrackTools};
