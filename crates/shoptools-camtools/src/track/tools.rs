//! Tool resolution for a render
//!
//! The working tool set is derived fresh for every build from the
//! configured general cutting tool and the user tools that the workpiece's
//! operations name.

use crate::pattern::CutProfile;
use serde::{Deserialize, Serialize};
use shoptools_core::data::Tool;
use shoptools_settings::ConfigurationProfile;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A tool as the toolpath builder sees it (all lengths in mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackTool {
    pub tool_name: String,
    pub diameter: f64,
    /// Distance from the tool center to its cutting edge
    pub kerf_clearance: f64,
    pub max_depth_per_pass: f64,
    /// The general cutting tool, used when an operation names no tool
    pub is_default: bool,
}

impl TrackTool {
    pub fn new(tool_name: &str, diameter: f64, is_default: bool) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            diameter,
            kerf_clearance: diameter / 2.0,
            max_depth_per_pass: diameter / 2.0,
            is_default,
        }
    }

    /// Derive from a configured tool, reading its diameter text in the
    /// profile's display units
    pub fn from_tool(tool: &Tool, config: &ConfigurationProfile, is_default: bool) -> Self {
        let diameter = config.to_mm(tool.diameter_text());
        if diameter <= 0.0 {
            warn!("Tool '{}' has no usable diameter", tool.name);
        }
        Self::new(tool.name.trim(), diameter, is_default)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.tool_name.eq_ignore_ascii_case(name.trim())
    }
}

/// The tools needed for one job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackTools {
    tools: Vec<TrackTool>,
}

impl TrackTools {
    /// Build the working set: the general tool first (if configured), then
    /// each distinct tool named by an operation, in encounter order
    ///
    /// Names that match no user tool are logged once and left out; the
    /// builder reports them per operation.
    pub fn initialize(config: &ConfigurationProfile, cuts: &[CutProfile]) -> Self {
        let mut tools = Vec::new();
        if let Some(general) = &config.general_cutting_tool {
            tools.push(TrackTool::from_tool(general, config, true));
        }

        let mut missing = HashSet::new();
        let names = cuts
            .iter()
            .flat_map(|cut| cut.operations.iter())
            .map(|op| op.tool.trim())
            .filter(|name| !name.is_empty());

        for name in names {
            if tools.iter().any(|t: &TrackTool| t.is_named(name)) {
                continue;
            }
            match config.find_user_tool(name) {
                Some(tool) => tools.push(TrackTool::from_tool(tool, config, false)),
                None => {
                    if missing.insert(name.to_lowercase()) {
                        warn!("Tool '{}' is not configured", name);
                    }
                }
            }
        }

        debug!("Initialized {} track tool(s)", tools.len());
        Self { tools }
    }

    /// Tool by name (case-insensitive); a blank name selects the default
    pub fn select(&self, name: &str) -> Option<&TrackTool> {
        self.position(name).map(|index| &self.tools[index])
    }

    /// Index of the tool [`TrackTools::select`] would return
    pub fn position(&self, name: &str) -> Option<usize> {
        if name.trim().is_empty() {
            self.tools.iter().position(|t| t.is_default)
        } else {
            self.tools.iter().position(|t| t.is_named(name))
        }
    }

    pub fn default_tool(&self) -> Option<&TrackTool> {
        self.tools.iter().find(|t| t.is_default)
    }

    pub fn tools(&self) -> &[TrackTool] {
        &self.tools
    }

    pub fn into_vec(self) -> Vec<TrackTool> {
        self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
