//! # ShopTools CAM Tools
//!
//! Turns patterns placed on a workpiece into G-code.
//!
//! - [`pattern`]: pattern templates, operations and cut profiles
//! - [`workpiece`]: workpiece placement and operation references
//! - [`track`]: tool resolution and the track layer builder
//! - [`gcode`]: machine coordinates, the renderer and file naming

pub mod error;
pub mod gcode;
pub mod pattern;
pub mod track;
pub mod workpiece;

pub use error::{CamToolError, CamToolResult, PatternError, PatternResult, TrackError};
pub use gcode::{GcodeFile, GcodeRenderer, MachineCoordinates};
pub use pattern::{CutProfile, Orientation, PatternOperation, PatternTemplate, SharedVariable};
pub use track::{
    TrackBuild, TrackBuilder, TrackLayer, TrackSegment, TrackSegmentType, TrackTool, TrackTools,
};
pub use workpiece::{OperationRef, WorkpieceInfo};
