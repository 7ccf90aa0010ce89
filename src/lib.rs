//! # ShopTools
//!
//! Toolpath synthesis and G-code generation for pattern-based CNC router
//! jobs.
//!
//! ## Architecture
//!
//! ShopTools is organized as a workspace with multiple crates:
//!
//! 1. **shoptools-core** - Measurement parsing, units, geometry, tool/material/catalog data
//! 2. **shoptools-settings** - The configuration profile
//! 3. **shoptools-camtools** - Pattern model, track builder, G-code renderer
//! 4. **shoptools** - This crate: re-exports, logging setup and the `shoptools` binary
//!
//! ## Pipeline
//!
//! - Measurement text (`2' 6"`, `1 3/8in`) is resolved to millimeters
//! - Pattern templates are bound to the workpiece as cut profiles
//! - The track builder resolves tools and turns operations into per-tool
//!   layers of Plot, Plunge and Transit segments
//! - The renderer writes one self-contained G-code program per tool

pub use shoptools_camtools::{
    gcode, pattern, track, workpiece, CamToolError, CamToolResult, CutProfile, GcodeFile,
    GcodeRenderer, Orientation, OperationRef, PatternError, PatternOperation, PatternTemplate,
    SharedVariable, TrackBuild, TrackBuilder, TrackError, TrackLayer, TrackSegment,
    TrackSegmentType, TrackTool, TrackTools, WorkpieceInfo,
};
pub use shoptools_core::{data, geometry, measurement, units};
pub use shoptools_settings::{ConfigError, ConfigurationProfile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging as one JSON object per line, for log collectors
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}
