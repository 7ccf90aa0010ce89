//! G-code output
//!
//! Renders track builds into text programs, one per tool, and names the
//! resulting files.

pub mod coordinates;
pub mod filename;
pub mod renderer;

pub use coordinates::MachineCoordinates;
pub use filename::{default_base_name, normalize_extension, DEFAULT_EXTENSION};
pub use renderer::{GcodeFile, GcodeRenderer};
