//! # ShopTools Core
//!
//! Core types and utilities for ShopTools.
//! Provides measurement string parsing, unit conversion, geometry
//! primitives, and the configuration data models shared by the settings
//! and CAM crates.

pub mod data;
pub mod error;
pub mod geometry;
pub mod measurement;
pub mod units;

pub use data::{MaterialType, OperationAction, OperationActionProperty, PropertyName, Tool, ToolId};
pub use error::{Error, Result};
pub use geometry::{
    line_intersection, Area, DirectionLeftRight, OffsetLeftRight, OffsetTopBottom, Point,
};
pub use measurement::{
    measurement_to_inches, measurement_to_mm, parse_angle, parse_measurements, sum_as_inches,
    sum_as_millimeters, Measurement,
};
pub use units::{format_decimal, format_length, LengthUnit, MeasurementSystem};
