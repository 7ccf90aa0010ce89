//! User tool definitions
//!
//! This module provides:
//! - User-defined tools with a free-form property map
//! - Tool type definitions describing which properties a tool type carries
//! - The standard tool type table
//! - Case-insensitive tool lookup by name

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Property holding a tool's cutting diameter as measurement text
pub const DIAMETER_PROPERTY: &str = "Diameter";

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolId(
    /// The unique identifier for the tool.
    pub Uuid,
);

impl ToolId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToolId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data type of a tool property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolPropertyType {
    MeasurementString,
    AngleString,
    String,
    Integer,
}

/// One property a tool type carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTypeProperty {
    pub name: String,
    pub data_type: ToolPropertyType,
}

impl ToolTypeProperty {
    pub fn new(name: &str, data_type: ToolPropertyType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Definition of a tool type, referenced by name from [`Tool::tool_type`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTypeDefinition {
    pub name: String,
    pub description: String,
    pub properties: Vec<ToolTypeProperty>,
}

impl ToolTypeDefinition {
    /// Whether the type declares a property (case-insensitive)
    pub fn has_property(&self, name: &str) -> bool {
        self.properties
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Standard tool type table
pub fn standard_tool_types() -> Vec<ToolTypeDefinition> {
    use ToolPropertyType::*;

    let diameter = || ToolTypeProperty::new(DIAMETER_PROPERTY, MeasurementString);
    vec![
        ToolTypeDefinition {
            name: "Straight Bit".to_string(),
            description: "Flat bottomed straight router bit".to_string(),
            properties: vec![
                diameter(),
                ToolTypeProperty::new("CuttingLength", MeasurementString),
                ToolTypeProperty::new("Flutes", Integer),
            ],
        },
        ToolTypeDefinition {
            name: "Spiral Bit".to_string(),
            description: "Up-cut or down-cut spiral end mill".to_string(),
            properties: vec![
                diameter(),
                ToolTypeProperty::new("CuttingLength", MeasurementString),
                ToolTypeProperty::new("Spiral", String),
            ],
        },
        ToolTypeDefinition {
            name: "V-Bit".to_string(),
            description: "V-groove engraving bit".to_string(),
            properties: vec![diameter(), ToolTypeProperty::new("Angle", AngleString)],
        },
        ToolTypeDefinition {
            name: "Drill Bit".to_string(),
            description: "Twist or brad point drill".to_string(),
            properties: vec![diameter(), ToolTypeProperty::new("TipAngle", AngleString)],
        },
    ]
}

/// A user-defined tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique tool identifier, generated when missing from a document
    #[serde(default)]
    pub id: ToolId,
    /// Display name, unique across the configuration (case-insensitive)
    pub name: String,
    /// Name of a [`ToolTypeDefinition`]
    pub tool_type: String,
    /// Property values keyed by property name
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Tool {
    /// Create a new tool with no properties
    pub fn new(name: impl Into<String>, tool_type: impl Into<String>) -> Self {
        Self {
            id: ToolId::new(),
            name: name.into(),
            tool_type: tool_type.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    /// Property value by name (case-insensitive)
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Diameter measurement text, empty when unset
    pub fn diameter_text(&self) -> &str {
        self.property(DIAMETER_PROPERTY).unwrap_or_default()
    }

    /// Whether this tool answers to `name` (case-insensitive)
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Find a tool by name (case-insensitive)
pub fn find_tool<'a>(tools: &'a [Tool], name: &str) -> Option<&'a Tool> {
    tools.iter().find(|t| t.is_named(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_properties() {
        let tool = Tool::new("Quarter Inch", "Straight Bit").with_property("diameter", "1/4in");
        assert_eq!(tool.diameter_text(), "1/4in");
        assert_eq!(tool.property("DIAMETER"), Some("1/4in"));
        assert_eq!(tool.property("Flutes"), None);
    }

    #[test]
    fn test_find_tool_case_insensitive() {
        let tools = vec![
            Tool::new("Quarter Inch", "Straight Bit"),
            Tool::new("V90", "V-Bit"),
        ];
        assert_eq!(find_tool(&tools, "v90").map(|t| t.tool_type.as_str()), Some("V-Bit"));
        assert!(find_tool(&tools, "Eighth").is_none());
    }

    #[test]
    fn test_standard_tool_types() {
        let types = standard_tool_types();
        assert!(types.iter().all(|t| t.has_property("diameter")));
        assert!(types.iter().any(|t| t.name == "V-Bit" && t.has_property("Angle")));
    }

    #[test]
    fn test_tool_ids_are_unique() {
        assert_ne!(ToolId::new(), ToolId::new());
    }

    #[test]
    fn test_tool_from_json_without_id() {
        let tool: Tool = serde_json::from_str(
            r#"{ "name": "Eighth", "tool_type": "Spiral Bit", "properties": { "Diameter": "1/8in" } }"#,
        )
        .unwrap();
        assert_eq!(tool.diameter_text(), "1/8in");
        assert!(tool.is_named("eighth"));
    }
}
