//! Workpiece placement and the cuts bound to it
//!
//! The user describes the workpiece with measurement text (length, width,
//! depth, offsets and offset origins). [`WorkpieceInfo::configure_from_user_values`]
//! resolves that text against the workspace area into the millimeter fields
//! the toolpath builder reads. The builder never writes to the workpiece.

use crate::pattern::{CutProfile, PatternOperation};
use serde::{Deserialize, Serialize};
use shoptools_core::geometry::{Area, OffsetLeftRight, OffsetTopBottom, Point};
use shoptools_core::units::format_length;
use shoptools_settings::ConfigurationProfile;
use std::fmt;
use tracing::{debug, warn};

/// Index of an operation: the cut it belongs to and its position in that cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationRef {
    pub cut: usize,
    pub operation: usize,
}

impl OperationRef {
    pub fn new(cut: usize, operation: usize) -> Self {
        Self { cut, operation }
    }
}

impl fmt::Display for OperationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cut {} operation {}", self.cut, self.operation)
    }
}

/// The workpiece being cut
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkpieceInfo {
    /// X extent, measurement text
    #[serde(default)]
    pub user_length: String,
    /// Y extent, measurement text
    #[serde(default)]
    pub user_width: String,
    /// Thickness, measurement text
    #[serde(default)]
    pub user_depth: String,
    #[serde(default)]
    pub user_offset_x: String,
    #[serde(default)]
    pub user_offset_y: String,
    #[serde(default)]
    pub offset_x_origin: OffsetLeftRight,
    #[serde(default)]
    pub offset_y_origin: OffsetTopBottom,

    /// Area the workpiece is placed within, in table coordinates (mm)
    #[serde(default)]
    pub workspace_area: Area,
    /// Resolved workpiece rectangle in table coordinates (mm)
    #[serde(default)]
    pub area: Area,
    /// Resolved thickness (mm)
    #[serde(default)]
    pub thickness: f64,
    /// Where the router sits before the job starts, table coordinates (mm)
    #[serde(default)]
    pub router_location: Point,

    #[serde(default)]
    pub material_type_name: String,
    #[serde(default)]
    pub cuts: Vec<CutProfile>,

    /// Display strings in the alternate unit system
    #[serde(default)]
    pub alt_length: String,
    #[serde(default)]
    pub alt_width: String,
    #[serde(default)]
    pub alt_depth: String,
}

impl WorkpieceInfo {
    /// Workpiece whose workspace is the whole table
    pub fn for_table(config: &ConfigurationProfile) -> Self {
        Self {
            workspace_area: Area::new(
                Point::default(),
                config.table_length_mm(),
                config.table_width_mm(),
            ),
            ..Default::default()
        }
    }

    /// Resolve the user measurement text into `area`, `thickness` and the
    /// alternate-unit display strings
    pub fn configure_from_user_values(&mut self, config: &ConfigurationProfile) {
        let length = config.to_mm(&self.user_length);
        let width = config.to_mm(&self.user_width);
        let offset_x = config.to_mm(&self.user_offset_x);
        let offset_y = config.to_mm(&self.user_offset_y);

        let workspace = self.workspace_area;
        let x = workspace.location.x
            + self
                .offset_x_origin
                .resolve(offset_x, workspace.length - length);
        let y = workspace.location.y
            + self
                .offset_y_origin
                .resolve(offset_y, workspace.width - width);

        self.area = Area::new(Point::new(x, y), length, width);
        self.thickness = config.to_mm(&self.user_depth);
        if self.area.location.x < workspace.location.x
            || self.area.location.y < workspace.location.y
            || self.area.max_x() > workspace.max_x()
            || self.area.max_y() > workspace.max_y()
        {
            warn!("Workpiece extends beyond the workspace area");
        }

        let alternate = config.display_units.alternate();
        self.alt_length = format_length(length, alternate);
        self.alt_width = format_length(width, alternate);
        self.alt_depth = format_length(self.thickness, alternate);

        debug!(
            "Workpiece area {} {}x{}mm, thickness {}mm",
            self.area.location, self.area.length, self.area.width, self.thickness
        );
    }

    /// Operation referenced by `op`
    pub fn operation(&self, op: OperationRef) -> Option<&PatternOperation> {
        self.cuts.get(op.cut)?.operations.get(op.operation)
    }

    /// Convert a point relative to the workpiece origin into table coordinates
    pub fn to_table(&self, point: Point) -> Point {
        point.translated(self.area.location.x, self.area.location.y)
    }
}
