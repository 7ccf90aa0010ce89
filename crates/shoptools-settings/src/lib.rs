//! ShopTools Settings Crate
//!
//! Holds the configuration profile: the immutable snapshot of units, table
//! geometry, materials, tools and the operation property catalog that the
//! toolpath builder and G-code renderer read during a render.

pub mod config;
pub mod error;

pub use config::{
    AxisSettings, ConfigurationProfile, TableDimensions, TravelDirection, ZOrigin,
};
pub use error::{ConfigError, ConfigResult};
