//! Unit conversion utilities
//!
//! Handles conversion between the metric and imperial length units that can
//! appear in measurement text, plus the `0.###` decimal formatting used for
//! G-code coordinates and user-facing display strings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// The length unit measurement text defaults to in this system
    pub fn default_unit(self) -> LengthUnit {
        match self {
            Self::Metric => LengthUnit::Millimeter,
            Self::Imperial => LengthUnit::Inch,
        }
    }

    /// The other system, used for alternate-unit display strings
    pub fn alternate(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(Error::invalid_enum("MeasurementSystem", s)),
        }
    }
}

/// Length units understood by the conversion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
    Yard,
}

impl LengthUnit {
    /// Resolve a unit token such as `mm`, `in`, `"` or `feet`
    pub fn from_token(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Self::Millimeter)
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(Self::Centimeter)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meter),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(Self::Foot),
            "yd" | "yard" | "yards" => Ok(Self::Yard),
            other => Err(Error::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }

    /// Canonical short label
    pub fn label(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Yard => "yd",
        }
    }

    /// Whether the unit belongs to the metric system
    pub fn is_metric(self) -> bool {
        matches!(self, Self::Millimeter | Self::Centimeter | Self::Meter)
    }

    /// Size of one unit in the base unit of its own system (mm or inches)
    fn base_factor(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 10.0,
            Self::Meter => 1000.0,
            Self::Inch => 1.0,
            Self::Foot => 12.0,
            Self::Yard => 36.0,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

/// Convert a length between two units
///
/// Conversions inside one system use that system's base unit so that
/// `2ft` is exactly `24in`; crossing systems goes through 25.4 mm/in.
pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    let base = value * from.base_factor();
    let base = match (from.is_metric(), to.is_metric()) {
        (true, false) => base / MM_PER_INCH,
        (false, true) => base * MM_PER_INCH,
        _ => base,
    };
    base / to.base_factor()
}

/// Format a number with at most three decimals, trimming trailing zeros
///
/// Mirrors the `0.###` pattern used for every coordinate and feed rate in
/// emitted G-code: `12.5`, `3.175`, `100`, `0.333`.
pub fn format_decimal(value: f64) -> String {
    let mut text = format!("{:.3}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Format a length held in millimeters for display in `system`, with unit label
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    let unit = system.default_unit();
    format!(
        "{}{}",
        format_decimal(convert(value_mm, LengthUnit::Millimeter, unit)),
        unit.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_tokens() {
        assert_eq!(LengthUnit::from_token("MM").unwrap(), LengthUnit::Millimeter);
        assert_eq!(LengthUnit::from_token("\"").unwrap(), LengthUnit::Inch);
        assert_eq!(LengthUnit::from_token("'").unwrap(), LengthUnit::Foot);
        assert_eq!(LengthUnit::from_token(" feet ").unwrap(), LengthUnit::Foot);
        assert!(LengthUnit::from_token("furlong").is_err());
    }

    #[test]
    fn test_conversion() {
        assert_eq!(convert(1.0, LengthUnit::Inch, LengthUnit::Millimeter), 25.4);
        assert_eq!(convert(2.0, LengthUnit::Foot, LengthUnit::Inch), 24.0);
        assert_eq!(convert(5.0, LengthUnit::Centimeter, LengthUnit::Millimeter), 50.0);
        assert_eq!(convert(7.0, LengthUnit::Yard, LengthUnit::Yard), 7.0);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(12.5), "12.5");
        assert_eq!(format_decimal(3.175), "3.175");
        assert_eq!(format_decimal(100.0), "100");
        assert_eq!(format_decimal(1.0 / 3.0), "0.333");
        assert_eq!(format_decimal(-0.0001), "0");
        assert_eq!(format_decimal(-2.25), "-2.25");
    }

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(25.4, MeasurementSystem::Imperial), "1in");
        assert_eq!(format_length(25.4, MeasurementSystem::Metric), "25.4mm");
    }

    #[test]
    fn test_measurement_system() {
        assert_eq!(
            "in".parse::<MeasurementSystem>().unwrap(),
            MeasurementSystem::Imperial
        );
        assert_eq!(MeasurementSystem::Metric.alternate(), MeasurementSystem::Imperial);
        assert_eq!(MeasurementSystem::Imperial.default_unit(), LengthUnit::Inch);
        assert!("cubits".parse::<MeasurementSystem>().is_err());
    }
}
