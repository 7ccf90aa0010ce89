//! Material types
//!
//! A material type pairs a name with the feed rate to cut it at. The feed
//! rate is measurement text (a distance per minute) so that users can enter
//! it in either unit system.

use crate::measurement::measurement_to_mm;
use serde::{Deserialize, Serialize};

/// A material the workpiece can be made of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialType {
    /// Display name, matched case-insensitively
    pub name: String,
    /// Feed rate as measurement text, per minute
    pub feed_rate: String,
}

impl MaterialType {
    pub fn new(name: impl Into<String>, feed_rate: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_rate: feed_rate.into(),
        }
    }

    /// Feed rate in mm/min; bare numbers are read in `default_unit`
    pub fn feed_rate_mm(&self, default_unit: &str) -> f64 {
        measurement_to_mm(&self.feed_rate, default_unit)
    }
}

/// Find a material by name (case-insensitive)
pub fn find_material<'a>(materials: &'a [MaterialType], name: &str) -> Option<&'a MaterialType> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    materials.iter().find(|m| m.name.trim().eq_ignore_ascii_case(name))
}

/// Standard material table
pub fn standard_materials() -> Vec<MaterialType> {
    vec![
        MaterialType::new("Softwood", "1500mm"),
        MaterialType::new("Hardwood", "1000mm"),
        MaterialType::new("Plywood", "1200mm"),
        MaterialType::new("MDF", "1800mm"),
        MaterialType::new("Acrylic", "600mm"),
    ]
}
