//! Track segments and layers

use super::tools::TrackTool;
use crate::workpiece::OperationRef;
use serde::{Deserialize, Serialize};
use shoptools_core::geometry::Point;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackSegmentType {
    #[default]
    None,
    /// Feed along a line at depth
    Plot,
    /// Drill down at a point and retract
    Plunge,
    /// Rapid move at safe height
    Transit,
}

impl fmt::Display for TrackSegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Plot => write!(f, "Plot"),
            Self::Plunge => write!(f, "Plunge"),
            Self::Transit => write!(f, "Transit"),
        }
    }
}

/// One motion primitive, in table coordinates (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub segment_type: TrackSegmentType,
    pub start_offset: Point,
    pub end_offset: Point,
    /// Depth of this pass below the top of material
    pub depth: f64,
    /// Depth the source operation ultimately reaches
    pub target_depth: f64,
    /// mm/min
    pub feed_rate: f64,
    /// Source operation; `None` for implicit moves
    pub operation: Option<OperationRef>,
}

impl TrackSegment {
    pub fn plot(start: Point, end: Point, depth: f64, target_depth: f64, feed_rate: f64) -> Self {
        Self {
            segment_type: TrackSegmentType::Plot,
            start_offset: start,
            end_offset: end,
            depth,
            target_depth,
            feed_rate,
            operation: None,
        }
    }

    pub fn plunge(at: Point, depth: f64, feed_rate: f64) -> Self {
        Self {
            segment_type: TrackSegmentType::Plunge,
            start_offset: at,
            end_offset: at,
            depth,
            target_depth: depth,
            feed_rate,
            operation: None,
        }
    }

    pub fn transit(start: Point, end: Point) -> Self {
        Self {
            segment_type: TrackSegmentType::Transit,
            start_offset: start,
            end_offset: end,
            depth: 0.0,
            target_depth: 0.0,
            feed_rate: 0.0,
            operation: None,
        }
    }

    pub fn for_operation(mut self, operation: Option<OperationRef>) -> Self {
        self.operation = operation;
        self
    }

    pub fn length(&self) -> f64 {
        self.start_offset.distance_to(&self.end_offset)
    }
}

/// Consecutive segments cut with one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackLayer {
    pub tool: TrackTool,
    pub segments: Vec<TrackSegment>,
}

impl TrackLayer {
    pub fn new(tool: TrackTool) -> Self {
        Self {
            tool,
            segments: Vec::new(),
        }
    }

    pub fn count_of(&self, segment_type: TrackSegmentType) -> usize {
        self.segments
            .iter()
            .filter(|s| s.segment_type == segment_type)
            .count()
    }
}
