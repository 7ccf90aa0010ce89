//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for pattern editing, the
//! recoverable problems reported while building track layers, and file
//! output.

use crate::workpiece::OperationRef;
use shoptools_core::data::{OperationAction, PropertyName};
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A pattern editing error occurred.
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
}

/// Errors related to reading and writing operation properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The catalog does not apply the property to the operation's action.
    #[error("Property '{property}' does not apply to {action} operations")]
    NotApplicable {
        property: PropertyName,
        action: OperationAction,
    },

    /// The text could not be converted into the property's type.
    #[error("Invalid value for '{property}': {reason}")]
    InvalidValue {
        property: PropertyName,
        reason: String,
    },

    /// A shared variable refers to an operation index that does not exist.
    #[error("Shared variable '{variable}' refers to missing operation {index}")]
    MissingOperation { variable: String, index: usize },
}

/// Recoverable problems found while building track layers.
///
/// These never abort a render; the offending operation is skipped and the
/// problem is reported on the build.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// The operation names a tool that is not configured.
    #[error("Tool '{tool_name}' used by {operation} is not configured")]
    UnresolvedTool {
        tool_name: String,
        operation: OperationRef,
    },

    /// The operation names no tool and no general cutting tool is configured.
    #[error("No general cutting tool configured for {operation}")]
    NoDefaultTool { operation: OperationRef },

    /// The cutting depth is negative, not a number, or beyond what the
    /// machine or tool can cut.
    #[error("Depth {depth}mm of {operation} is unusable: {reason}")]
    InvalidDepth {
        depth: f64,
        reason: String,
        operation: OperationRef,
    },

    /// An offset, length or angle put the operation out of numeric range.
    #[error("Location of {operation} is out of range")]
    InvalidLocation { operation: OperationRef },
}

impl TrackError {
    /// The operation that was skipped
    pub fn operation(&self) -> OperationRef {
        match self {
            Self::UnresolvedTool { operation, .. }
            | Self::NoDefaultTool { operation }
            | Self::InvalidDepth { operation, .. }
            | Self::InvalidLocation { operation } => *operation,
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for pattern editing.
pub type PatternResult<T> = Result<T, PatternError>;
