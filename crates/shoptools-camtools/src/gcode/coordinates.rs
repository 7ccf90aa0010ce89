//! Table to machine coordinate mapping
//!
//! Table coordinates have their origin at the bottom-left corner of the
//! table surface with Z measured upward. Machine coordinates depend on where
//! the controller's zero sits and which way each axis travels.

use shoptools_core::geometry::Point;
use shoptools_settings::{ConfigurationProfile, ZOrigin};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineCoordinates {
    x_origin: f64,
    y_origin: f64,
    z_origin: f64,
    x_sign: f64,
    y_sign: f64,
    z_sign: f64,
    z_travel: f64,
}

impl MachineCoordinates {
    pub fn from_config(config: &ConfigurationProfile) -> Self {
        let axes = &config.axes;
        let z_travel = config.table_depth_mm();
        let z_origin = match axes.z_origin {
            ZOrigin::Top => z_travel,
            ZOrigin::Center => z_travel / 2.0,
            ZOrigin::Bottom => 0.0,
        };

        Self {
            x_origin: axes.x_origin.resolve(0.0, config.table_length_mm()),
            y_origin: axes.y_origin.resolve(0.0, config.table_width_mm()),
            z_origin,
            x_sign: axes.x_direction.sign(),
            y_sign: axes.y_direction.sign(),
            z_sign: axes.z_direction.sign(),
            z_travel,
        }
    }

    /// Machine X/Y for a table point
    pub fn xy(&self, point: Point) -> (f64, f64) {
        (
            (point.x - self.x_origin) * self.x_sign,
            (point.y - self.y_origin) * self.y_sign,
        )
    }

    /// Machine Z for a height above the table surface
    pub fn z(&self, height: f64) -> f64 {
        (height - self.z_origin) * self.z_sign
    }

    pub fn top_of_material(&self, thickness: f64) -> f64 {
        self.z(thickness)
    }

    /// Z at the top of the table's travel
    pub fn fully_retracted(&self) -> f64 {
        self.z(self.z_travel)
    }

    /// Z for cutting `depth` below the top of material
    pub fn plunge(&self, thickness: f64, depth: f64) -> f64 {
        self.z(thickness - depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoptools_settings::TravelDirection;
    use shoptools_core::geometry::{OffsetLeftRight, OffsetTopBottom};

    #[test]
    fn test_default_axes() {
        let coords = MachineCoordinates::from_config(&ConfigurationProfile::new());
        assert_eq!(coords.xy(Point::new(12.0, 34.0)), (12.0, 34.0));
        assert_eq!(coords.fully_retracted(), 0.0);
        assert_eq!(coords.top_of_material(18.0), -132.0);
        assert_eq!(coords.plunge(18.0, 3.0), -135.0);
    }

    #[test]
    fn test_bottom_origin_counts_up() {
        let mut config = ConfigurationProfile::new();
        config.axes.z_origin = ZOrigin::Bottom;
        let coords = MachineCoordinates::from_config(&config);
        assert_eq!(coords.top_of_material(18.0), 18.0);
        assert_eq!(coords.plunge(18.0, 18.0), 0.0);
        assert_eq!(coords.fully_retracted(), 150.0);
    }

    #[test]
    fn test_negative_travel() {
        let mut config = ConfigurationProfile::new();
        config.axes.z_direction = TravelDirection::Negative;
        config.axes.x_direction = TravelDirection::Negative;
        config.axes.x_origin = OffsetLeftRight::Right;
        config.axes.y_origin = OffsetTopBottom::Top;
        let coords = MachineCoordinates::from_config(&config);

        assert_eq!(coords.xy(Point::new(1000.0, 1000.0)), (250.0, -250.0));
        assert_eq!(coords.top_of_material(18.0), 132.0);
        // Deeper cuts move further along the travel direction
        assert!(coords.plunge(18.0, 3.0) > coords.top_of_material(18.0));
    }
}
