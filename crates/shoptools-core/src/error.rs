//! Error handling for ShopTools core
//!
//! Parsing of measurement text never fails (see [`crate::measurement`]), so the
//! errors here only cover the strongly typed parts of the model: enum text
//! coming from configuration or pattern documents and unit tokens that the
//! conversion service does not know about.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for ShopTools core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A unit token was not recognised by the conversion service
    #[error("Unknown unit: {unit}")]
    UnknownUnit {
        /// The offending unit text.
        unit: String,
    },

    /// Text could not be mapped onto an enumerated value
    #[error("Invalid {kind} value: {value}")]
    InvalidEnumValue {
        /// Name of the enumeration being parsed.
        kind: &'static str,
        /// The text that failed to parse.
        value: String,
    },
}

impl Error {
    /// Shorthand for an [`Error::InvalidEnumValue`]
    pub fn invalid_enum(kind: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidEnumValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownUnit {
            unit: "furlong".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown unit: furlong");

        let err = Error::invalid_enum("OffsetLeftRight", "Middle");
        assert_eq!(err.to_string(), "Invalid OffsetLeftRight value: Middle");
    }
}
