//! Cut profiles: pattern templates bound to a place on the workpiece
//!
//! A cut has its own local frame. `u` runs along the pattern length and `v`
//! along the pattern width, both starting at the cut's start location. The
//! orientation decides which workpiece axis `u` follows.

use super::operation::PatternOperation;
use super::template::PatternTemplate;
use crate::error::PatternResult;
use serde::{Deserialize, Serialize};
use shoptools_core::data::OperationActionProperty;
use shoptools_core::geometry::Point;
use shoptools_settings::ConfigurationProfile;
use std::fmt;

/// Which workpiece axis the pattern length runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Length along X
    #[default]
    Horizontal,
    /// Length along Y
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
        }
    }
}

/// A pattern template instance placed on the workpiece
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutProfile {
    #[serde(default)]
    pub template_name: String,
    /// Relative to the workpiece area origin (mm)
    #[serde(default)]
    pub start_location: Point,
    #[serde(default)]
    pub end_location: Point,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub pattern_length: String,
    #[serde(default)]
    pub pattern_width: String,
    #[serde(default)]
    pub tool_sequence_strict: bool,
    #[serde(default)]
    pub operations: Vec<PatternOperation>,
}

impl CutProfile {
    /// Clone `template`, apply its shared variables and place it
    pub fn from_template(
        template: &PatternTemplate,
        catalog: &[OperationActionProperty],
        start: Point,
        end: Point,
        orientation: Orientation,
    ) -> PatternResult<Self> {
        let mut template = template.clone();
        template.apply_shared_variables(catalog)?;

        Ok(Self {
            template_name: template.name,
            start_location: start,
            end_location: end,
            orientation,
            pattern_length: template.pattern_length,
            pattern_width: template.pattern_width,
            tool_sequence_strict: template.tool_sequence_strict,
            operations: template.operations,
        })
    }

    /// Pattern length in mm; blank text means the start-to-end distance
    pub fn length_mm(&self, config: &ConfigurationProfile) -> f64 {
        if self.pattern_length.trim().is_empty() {
            self.start_location.distance_to(&self.end_location)
        } else {
            config.to_mm(&self.pattern_length)
        }
    }

    pub fn width_mm(&self, config: &ConfigurationProfile) -> f64 {
        config.to_mm(&self.pattern_width)
    }

    /// Map a local `(u, v)` point to workpiece coordinates
    pub fn to_workpiece(&self, local: Point) -> Point {
        match self.orientation {
            Orientation::Horizontal => self.start_location.translated(local.x, local.y),
            Orientation::Vertical => self.start_location.translated(local.y, local.x),
        }
    }
}
