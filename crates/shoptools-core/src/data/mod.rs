//! Configuration data models
//!
//! This module provides:
//! - User tools and tool type definitions
//! - Material types with feed rates
//! - Operation actions and the operation-action-property catalog

pub mod materials;
pub mod operations;
pub mod tools;

pub use materials::{find_material, standard_materials, MaterialType};
pub use operations::{
    applicable_properties, default_action_properties, property_applies, OperationAction,
    OperationActionProperty, PropertyDataType, PropertyName,
};
pub use tools::{
    find_tool, standard_tool_types, Tool, ToolId, ToolPropertyType, ToolTypeDefinition,
    ToolTypeProperty, DIAMETER_PROPERTY,
};
