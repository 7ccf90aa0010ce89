//! Configuration profile for ShopTools
//!
//! The profile is loaded once per process by the caller and handed by
//! reference to the toolpath builder and G-code renderer, which treat it as
//! an immutable snapshot for the duration of a render.
//!
//! Configuration is organized into logical sections:
//! - Display units used as the default for bare numbers
//! - Table dimensions and axis travel directions/origins
//! - Material types with feed rates
//! - The operation-action-property catalog
//! - Tool type definitions, user tools, and the general cutting tool

pub use shoptools_core::units::MeasurementSystem;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use shoptools_core::data::{
    default_action_properties, find_material, find_tool, standard_materials,
    standard_tool_types, MaterialType, OperationAction, OperationActionProperty, Tool,
    ToolTypeDefinition,
};
use shoptools_core::geometry::{OffsetLeftRight, OffsetTopBottom};
use shoptools_core::measurement::measurement_to_mm;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Direction an axis moves for increasing machine coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelDirection {
    #[default]
    Positive,
    Negative,
}

impl TravelDirection {
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// Where Z zero sits within the table's Z travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZOrigin {
    #[default]
    Top,
    Center,
    Bottom,
}

impl fmt::Display for ZOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "Top"),
            Self::Center => write!(f, "Center"),
            Self::Bottom => write!(f, "Bottom"),
        }
    }
}

/// Table travel, as measurement text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDimensions {
    /// X travel
    pub length: String,
    /// Y travel
    pub width: String,
    /// Z travel, measured up from the table surface
    pub depth: String,
}

impl Default for TableDimensions {
    fn default() -> Self {
        Self {
            length: "1250mm".to_string(),
            width: "1250mm".to_string(),
            depth: "150mm".to_string(),
        }
    }
}

/// Axis travel directions and origin locations
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSettings {
    pub x_direction: TravelDirection,
    pub y_direction: TravelDirection,
    pub z_direction: TravelDirection,
    pub x_origin: OffsetLeftRight,
    pub y_origin: OffsetTopBottom,
    pub z_origin: ZOrigin,
}

/// Complete configuration profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationProfile {
    /// Unit system bare numbers are read in
    #[serde(default)]
    pub display_units: MeasurementSystem,
    #[serde(default)]
    pub table: TableDimensions,
    #[serde(default)]
    pub axes: AxisSettings,
    #[serde(default = "standard_materials")]
    pub material_types: Vec<MaterialType>,
    #[serde(default = "default_action_properties")]
    pub action_properties: Vec<OperationActionProperty>,
    #[serde(default = "standard_tool_types")]
    pub tool_types: Vec<ToolTypeDefinition>,
    #[serde(default)]
    pub user_tools: Vec<Tool>,
    /// Tool used by operations that name no tool
    #[serde(default)]
    pub general_cutting_tool: Option<Tool>,
}

impl Default for ConfigurationProfile {
    fn default() -> Self {
        Self {
            display_units: MeasurementSystem::default(),
            table: TableDimensions::default(),
            axes: AxisSettings::default(),
            material_types: standard_materials(),
            action_properties: default_action_properties(),
            tool_types: standard_tool_types(),
            user_tools: Vec::new(),
            general_cutting_tool: None,
        }
    }
}

impl ConfigurationProfile {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit label bare numbers default to (`mm` or `in`)
    pub fn default_unit(&self) -> &'static str {
        self.display_units.default_unit().label()
    }

    /// Resolve measurement text to millimeters using the display units
    pub fn to_mm(&self, text: &str) -> f64 {
        measurement_to_mm(text, self.default_unit())
    }

    pub fn table_length_mm(&self) -> f64 {
        self.to_mm(&self.table.length)
    }

    pub fn table_width_mm(&self) -> f64 {
        self.to_mm(&self.table.width)
    }

    pub fn table_depth_mm(&self) -> f64 {
        self.to_mm(&self.table.depth)
    }

    /// User tool by name (case-insensitive)
    pub fn find_user_tool(&self, name: &str) -> Option<&Tool> {
        find_tool(&self.user_tools, name)
    }

    /// Material type by name (case-insensitive)
    pub fn find_material(&self, name: &str) -> Option<&MaterialType> {
        find_material(&self.material_types, name)
    }

    /// All problems found in the profile
    pub fn issues(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        let mut tool_names = HashSet::new();
        for tool in &self.user_tools {
            if !tool_names.insert(tool.name.trim().to_lowercase()) {
                issues.push(ConfigError::DuplicateToolName(tool.name.clone()));
            }
            if !self
                .tool_types
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(&tool.tool_type))
            {
                issues.push(ConfigError::UnknownToolType {
                    tool: tool.name.clone(),
                    tool_type: tool.tool_type.clone(),
                });
            }
        }

        let mut material_names = HashSet::new();
        for material in &self.material_types {
            if !material_names.insert(material.name.trim().to_lowercase()) {
                issues.push(ConfigError::DuplicateMaterialName(material.name.clone()));
            }
            if material.feed_rate_mm(self.default_unit()) <= 0.0 {
                issues.push(ConfigError::InvalidFeedRate(material.name.clone()));
            }
        }

        for entry in &self.action_properties {
            if !OperationAction::all().iter().any(|a| entry.applies_to(*a)) {
                issues.push(ConfigError::EmptyCatalogEntry(
                    entry.property_name.to_string(),
                ));
            }
        }

        issues
    }

    /// Validate the profile, reporting the first problem found
    pub fn validate(&self) -> ConfigResult<()> {
        let issues = self.issues();
        debug!("Configuration profile has {} issue(s)", issues.len());
        match issues.into_iter().next() {
            Some(issue) => Err(issue),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoptools_core::data::{OperationActionProperty, PropertyDataType, PropertyName};

    #[test]
    fn test_default_profile_is_valid() {
        let config = ConfigurationProfile::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_unit(), "mm");
        assert_eq!(config.table_depth_mm(), 150.0);
    }

    #[test]
    fn test_imperial_bare_numbers() {
        let config = ConfigurationProfile {
            display_units: MeasurementSystem::Imperial,
            ..Default::default()
        };
        assert_eq!(config.to_mm("2"), 50.8);
    }

    #[test]
    fn test_duplicate_tool_names() {
        let mut config = ConfigurationProfile::new();
        config.user_tools.push(Tool::new("Quarter", "Straight Bit"));
        config.user_tools.push(Tool::new("QUARTER", "Straight Bit"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateToolName("QUARTER".to_string()))
        );
    }

    #[test]
    fn test_unknown_tool_type() {
        let mut config = ConfigurationProfile::new();
        config.user_tools.push(Tool::new("Beam", "Laser"));
        assert!(matches!(
            config.issues().as_slice(),
            [ConfigError::UnknownToolType { .. }]
        ));
    }

    #[test]
    fn test_material_issues() {
        let mut config = ConfigurationProfile::new();
        config.material_types = vec![
            MaterialType::new("Oak", "1000"),
            MaterialType::new("oak", "1000"),
            MaterialType::new("Foam", "fast"),
        ];
        let issues = config.issues();
        assert!(issues.contains(&ConfigError::DuplicateMaterialName("oak".to_string())));
        assert!(issues.contains(&ConfigError::InvalidFeedRate("Foam".to_string())));
    }

    #[test]
    fn test_empty_catalog_entry() {
        let mut config = ConfigurationProfile::new();
        config.action_properties.push(
            OperationActionProperty::new(PropertyName::Length, PropertyDataType::MeasurementString)
                .including(&[OperationAction::Plot])
                .excluding(&[OperationAction::Plot]),
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyCatalogEntry("Length".to_string()))
        );
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config: ConfigurationProfile =
            serde_json::from_str(r#"{ "display_units": "imperial" }"#).unwrap();
        assert_eq!(config.display_units, MeasurementSystem::Imperial);
        assert_eq!(config.action_properties, default_action_properties());
        assert!(config.general_cutting_tool.is_none());
    }
}
