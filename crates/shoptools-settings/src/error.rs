//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration
//! validation.

use thiserror::Error;

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Two user tools share a name (names compare case-insensitively).
    #[error("Duplicate tool name: {0}")]
    DuplicateToolName(String),

    /// A user tool refers to a tool type that is not defined.
    #[error("Tool '{tool}' has unknown tool type '{tool_type}'")]
    UnknownToolType { tool: String, tool_type: String },

    /// Two material types share a name.
    #[error("Duplicate material name: {0}")]
    DuplicateMaterialName(String),

    /// A material type has a feed rate that does not resolve to a positive value.
    #[error("Material '{0}' has no usable feed rate")]
    InvalidFeedRate(String),

    /// A catalog entry excludes every action it includes.
    #[error("Catalog property '{0}' applies to no action")]
    EmptyCatalogEntry(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::DuplicateToolName("V90".to_string());
        assert_eq!(err.to_string(), "Duplicate tool name: V90");

        let err = ConfigError::UnknownToolType {
            tool: "Bit".to_string(),
            tool_type: "Laser".to_string(),
        };
        assert_eq!(err.to_string(), "Tool 'Bit' has unknown tool type 'Laser'");

        let err = ConfigError::EmptyCatalogEntry("Depth".to_string());
        assert_eq!(err.to_string(), "Catalog property 'Depth' applies to no action");
    }
}
