//! Geometry primitives
//!
//! Plain 2D points and axis-aligned areas in millimeters, plus the small
//! enumerations used to describe where an offset is measured from.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance used when deciding whether two locations coincide (mm)
pub const LOCATION_TOLERANCE: f64 = 1e-6;

/// A 2D point in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Copy the coordinates of `other` into this point
    pub fn transfer_values(&mut self, other: &Point) {
        self.x = other.x;
        self.y = other.y;
    }

    /// A translated copy of the point
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Equality within [`LOCATION_TOLERANCE`]
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= LOCATION_TOLERANCE
            && (self.y - other.y).abs() <= LOCATION_TOLERANCE
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// An axis-aligned rectangle: `location` is the minimum corner, `length`
/// runs along X and `width` along Y
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Area {
    pub location: Point,
    pub length: f64,
    pub width: f64,
}

impl Area {
    pub fn new(location: Point, length: f64, width: f64) -> Self {
        Self {
            location,
            length,
            width,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.location.x + self.length
    }

    pub fn max_y(&self) -> f64 {
        self.location.y + self.width
    }
}

/// Horizontal reference an X offset is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OffsetLeftRight {
    #[default]
    Left,
    Center,
    Right,
}

impl OffsetLeftRight {
    /// Resolve `offset` against a span of `extent` starting at 0
    pub fn resolve(self, offset: f64, extent: f64) -> f64 {
        match self {
            Self::Left => offset,
            Self::Center => extent / 2.0 + offset,
            Self::Right => extent - offset,
        }
    }
}

impl fmt::Display for OffsetLeftRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Center => write!(f, "Center"),
            Self::Right => write!(f, "Right"),
        }
    }
}

impl FromStr for OffsetLeftRight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(Error::invalid_enum("OffsetLeftRight", s)),
        }
    }
}

/// Vertical reference a Y offset is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OffsetTopBottom {
    Top,
    Center,
    #[default]
    Bottom,
}

impl OffsetTopBottom {
    /// Resolve `offset` against a span of `extent` starting at 0
    pub fn resolve(self, offset: f64, extent: f64) -> f64 {
        match self {
            Self::Bottom => offset,
            Self::Center => extent / 2.0 + offset,
            Self::Top => extent - offset,
        }
    }
}

impl fmt::Display for OffsetTopBottom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "Top"),
            Self::Center => write!(f, "Center"),
            Self::Bottom => write!(f, "Bottom"),
        }
    }
}

impl FromStr for OffsetTopBottom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "center" | "centre" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => Err(Error::invalid_enum("OffsetTopBottom", s)),
        }
    }
}

/// Side of a line relative to its direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DirectionLeftRight {
    /// Tool center rides on the line
    #[default]
    None,
    Left,
    Right,
}

impl DirectionLeftRight {
    /// Shift the line `start -> end` sideways by `distance`
    ///
    /// Returns the input unchanged for [`DirectionLeftRight::None`] or a
    /// degenerate line.
    pub fn offset_line(self, start: Point, end: Point, distance: f64) -> (Point, Point) {
        let length = start.distance_to(&end);
        if self == Self::None || length <= LOCATION_TOLERANCE {
            return (start, end);
        }
        // Left-hand normal of the direction of travel
        let nx = -(end.y - start.y) / length;
        let ny = (end.x - start.x) / length;
        let sign = if self == Self::Left { 1.0 } else { -1.0 };
        let (dx, dy) = (nx * distance * sign, ny * distance * sign);
        (start.translated(dx, dy), end.translated(dx, dy))
    }
}

/// Intersection of the infinite lines through `a0 -> a1` and `b0 -> b1`
///
/// `None` when the lines are parallel or either one is degenerate.
pub fn line_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let (ax, ay) = (a1.x - a0.x, a1.y - a0.y);
    let (bx, by) = (b1.x - b0.x, b1.y - b0.y);
    let denominator = ax * by - ay * bx;
    let scale = (ax.hypot(ay) * bx.hypot(by)).max(f64::MIN_POSITIVE);
    if denominator.abs() <= 1e-12 * scale {
        return None;
    }
    let t = ((b0.x - a0.x) * by - (b0.y - a0.y) * bx) / denominator;
    Some(a0.translated(ax * t, ay * t))
}

impl fmt::Display for DirectionLeftRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

impl FromStr for DirectionLeftRight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "center" => Ok(Self::None),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(Error::invalid_enum("DirectionLeftRight", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_translation() {
        let p = Point::new(1.0, 2.0).translated(3.0, -1.0);
        assert_eq!(p, Point::new(4.0, 1.0));

        let mut q = Point::default();
        q.transfer_values(&p);
        assert_eq!(q, p);

        assert!(p.is_finite());
        assert!(!Point::new(f64::MAX, 0.0).translated(f64::MAX, 0.0).is_finite());
    }

    #[test]
    fn test_point_approx_eq() {
        let p = Point::new(10.0, 10.0);
        assert!(p.approx_eq(&Point::new(10.0 + 1e-9, 10.0)));
        assert!(!p.approx_eq(&Point::new(10.1, 10.0)));
    }

    #[test]
    fn test_line_intersection() {
        let corner = line_intersection(
            Point::new(0.0, 3.0),
            Point::new(100.0, 3.0),
            Point::new(97.0, 0.0),
            Point::new(97.0, 100.0),
        );
        assert!(corner.is_some_and(|c| c.approx_eq(&Point::new(97.0, 3.0))));

        // Intersection beyond both segments
        let corner = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(10.0, 0.0),
            Point::new(9.0, 1.0),
        );
        assert_eq!(corner, Some(Point::new(5.0, 5.0)));

        let parallel = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(-10.0, 5.0),
        );
        assert_eq!(parallel, None);
    }

    #[test]
    fn test_area() {
        let area = Area::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert_eq!(area.max_x(), 110.0);
        assert_eq!(area.max_y(), 70.0);
    }

    #[test]
    fn test_offset_resolution() {
        assert_eq!(OffsetLeftRight::Left.resolve(10.0, 100.0), 10.0);
        assert_eq!(OffsetLeftRight::Center.resolve(10.0, 100.0), 60.0);
        assert_eq!(OffsetLeftRight::Right.resolve(10.0, 100.0), 90.0);
        assert_eq!(OffsetTopBottom::Top.resolve(5.0, 40.0), 35.0);
        assert_eq!(OffsetTopBottom::Bottom.resolve(5.0, 40.0), 5.0);
    }

    #[test]
    fn test_line_offset() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(10.0, 0.0);

        let (s, e) = DirectionLeftRight::Left.offset_line(start, end, 3.0);
        assert_eq!((s, e), (Point::new(0.0, 3.0), Point::new(10.0, 3.0)));

        let (s, e) = DirectionLeftRight::Right.offset_line(start, end, 3.0);
        assert_eq!((s, e), (Point::new(0.0, -3.0), Point::new(10.0, -3.0)));

        let (s, e) = DirectionLeftRight::None.offset_line(start, end, 3.0);
        assert_eq!((s, e), (start, end));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(
            "right".parse::<OffsetLeftRight>().unwrap(),
            OffsetLeftRight::Right
        );
        assert_eq!(
            "Centre".parse::<OffsetTopBottom>().unwrap(),
            OffsetTopBottom::Center
        );
        assert!("middle".parse::<DirectionLeftRight>().is_err());
    }
}
