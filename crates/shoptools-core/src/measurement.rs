//! Measurement string parsing
//!
//! Measurement text is free-form: `2ft 6in`, `2' 6"`, `12.5in 3/8`, `1 3/8`.
//! It is split into an ordered list of [`Measurement`]s (value text plus unit)
//! which are then summed in a target unit.
//!
//! Parsing is best-effort: a segment that cannot be understood contributes
//! zero to the total and parsing carries on. Nothing in this module returns an
//! error; degradations are logged as warnings.

use crate::units::{convert, LengthUnit};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// One numeric value with its unit, e.g. `{ value: "3/8", unit: "in" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Numeric text: decimal, fraction, or mixed number (`1 3/8`)
    pub value: String,
    /// Unit text (`mm`, `in`, `ft`, ...)
    pub unit: String,
}

impl Measurement {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Numeric value of `value`, with fractional notation resolved
    pub fn numeric_value(&self) -> f64 {
        parse_fractional(&self.value)
    }

    /// Value converted into `target`, or 0 when the unit is unknown or the
    /// value does not fit in an `f64`
    pub fn to_unit(&self, target: LengthUnit) -> f64 {
        match LengthUnit::from_token(&self.unit) {
            Ok(unit) => finite_or_zero(convert(self.numeric_value(), unit, target), &self.value),
            Err(err) => {
                warn!("Ignoring measurement '{}': {}", self, err);
                0.0
            }
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

fn measurement_regex() -> &'static Regex {
    static MEASUREMENT_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    MEASUREMENT_REGEX.get_or_init(|| {
        Regex::new(r"(?P<number>[-+0-9./ \t]*)(?P<unit>[^-+0-9./ \t]*)")
            .expect("invalid regex pattern")
    })
}

/// Split measurement text into its ordered (value, unit) pairs
///
/// Each numeric run is paired with the non-numeric run that follows it. A
/// missing unit inherits `default_unit`; `'` and `"` normalise to `ft` and
/// `in`. Runs without a digit are dropped, which also discards the empty
/// match the scanner produces at the end of the text.
pub fn parse_measurements(text: &str, default_unit: &str) -> Vec<Measurement> {
    let mut measurements = Vec::new();

    for captures in measurement_regex().captures_iter(text) {
        let number = captures
            .name("number")
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if !number.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }

        let unit = captures
            .name("unit")
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        let unit = match unit {
            "" => default_unit,
            "'" => "ft",
            "\"" => "in",
            other => other,
        };

        measurements.push(Measurement::new(number, unit));
    }

    measurements
}

/// Sum measurements in an arbitrary unit; an empty list sums to 0
pub fn sum_as(measurements: &[Measurement], target: LengthUnit) -> f64 {
    let total: f64 = measurements.iter().map(|m| m.to_unit(target)).sum();
    if total.is_finite() {
        total
    } else {
        warn!("Measurement total is out of range, using 0");
        0.0
    }
}

fn finite_or_zero(value: f64, text: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!("Measurement '{}' is out of range, using 0", text);
        0.0
    }
}

/// Sum measurements as inches
pub fn sum_as_inches(measurements: &[Measurement]) -> f64 {
    sum_as(measurements, LengthUnit::Inch)
}

/// Sum measurements as millimeters
pub fn sum_as_millimeters(measurements: &[Measurement]) -> f64 {
    sum_as(measurements, LengthUnit::Millimeter)
}

/// Parse and sum measurement text as millimeters
pub fn measurement_to_mm(text: &str, default_unit: &str) -> f64 {
    sum_as_millimeters(&parse_measurements(text, default_unit))
}

/// Parse and sum measurement text as inches
pub fn measurement_to_inches(text: &str, default_unit: &str) -> f64 {
    sum_as_inches(&parse_measurements(text, default_unit))
}

/// Parse `whole[ numerator/denominator]` numeric text
///
/// Pure integers, decimals, pure fractions and mixed numbers are accepted.
/// A zero denominator drops the fractional term; a malformed term contributes
/// zero. A hyphen between the whole and fractional parts (`2-3/8`) is read
/// as a separator.
pub fn parse_fractional(value: &str) -> f64 {
    let text = value.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let body = body.replace('-', " ");

    let mut total = 0.0;
    for part in body.split_whitespace() {
        match part.split_once('/') {
            Some((numerator, denominator)) => {
                match (numerator.parse::<f64>(), denominator.parse::<f64>()) {
                    (Ok(_), Ok(d)) if d == 0.0 => {
                        debug!("Zero denominator in '{}', fraction ignored", value);
                    }
                    (Ok(n), Ok(d)) if (n / d).is_finite() => total += n / d,
                    _ => warn!("Malformed fraction '{}' in '{}'", part, value),
                }
            }
            None => match part.parse::<f64>() {
                Ok(whole) if whole.is_finite() => total += whole,
                _ => warn!("Malformed number '{}' in '{}'", part, value),
            },
        }
    }

    let total = finite_or_zero(total, value);
    if negative {
        -total
    } else {
        total
    }
}

/// Parse an angle string into degrees (`45`, `45deg`, `45°`, `0.5rad`)
pub fn parse_angle(text: &str) -> f64 {
    let degrees: f64 = parse_measurements(text, "deg")
        .iter()
        .map(|m| {
            let value = m.numeric_value();
            match m.unit.to_lowercase().as_str() {
                "deg" | "degree" | "degrees" | "°" => value,
                "rad" | "radian" | "radians" => value.to_degrees(),
                other => {
                    warn!("Ignoring angle '{}': unknown unit '{}'", m, other);
                    0.0
                }
            }
        })
        .sum();
    finite_or_zero(degrees, text)
}
