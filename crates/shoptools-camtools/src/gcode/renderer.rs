//! G-code rendering
//!
//! Every run of layers cut with one tool becomes a self-contained program:
//! metric and absolute mode, a full retract, a comment header naming the
//! file, material, surface Z and tool, the motion for each segment, and a
//! closing full retract.
//!
//! Z moves are tracked with a small state machine. The tool is re-plunged
//! only when coming out of a retract or when the cutting depth changes, and
//! rapid moves to a point the tool is already at are skipped.

use super::coordinates::MachineCoordinates;
use super::filename::{default_base_name, filename_template, normalize_extension, substitute};
use crate::error::CamToolResult;
use crate::track::{TrackBuild, TrackBuilder, TrackLayer, TrackSegment, TrackSegmentType, TrackTool};
use crate::workpiece::WorkpieceInfo;
use shoptools_core::geometry::{Point, LOCATION_TOLERANCE};
use shoptools_core::units::format_decimal;
use shoptools_settings::ConfigurationProfile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One rendered program
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeFile {
    pub filename: String,
    pub tool_name: String,
    pub content: String,
}

impl GcodeFile {
    /// Write the program into `dir` under its file name
    pub fn write_to(&self, dir: &Path) -> CamToolResult<PathBuf> {
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Renders workpieces to G-code programs, one per tool run
pub struct GcodeRenderer<'a> {
    config: &'a ConfigurationProfile,
    coords: MachineCoordinates,
}

impl<'a> GcodeRenderer<'a> {
    pub fn new(config: &'a ConfigurationProfile) -> Self {
        Self {
            config,
            coords: MachineCoordinates::from_config(config),
        }
    }

    /// Build the track layers for `workpiece` and render them
    ///
    /// `base` defaults to a timestamped name and `extension` to `.gcode`.
    /// A workpiece without cuts renders to no files.
    pub fn render(
        &self,
        workpiece: &WorkpieceInfo,
        base: Option<&str>,
        extension: Option<&str>,
    ) -> Vec<GcodeFile> {
        if workpiece.cuts.is_empty() {
            debug!("Workpiece has no cuts, nothing to render");
            return Vec::new();
        }
        let build = TrackBuilder::new(self.config).build(workpiece);
        self.render_build(workpiece, &build, base, extension)
    }

    /// Render an existing build
    pub fn render_build(
        &self,
        workpiece: &WorkpieceInfo,
        build: &TrackBuild,
        base: Option<&str>,
        extension: Option<&str>,
    ) -> Vec<GcodeFile> {
        let base = match base.map(str::trim) {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => default_base_name(),
        };
        let extension = normalize_extension(extension);

        // First pass: one program per contiguous tool run, with placeholders
        let mut programs: Vec<ProgramWriter> = Vec::new();
        for layer in &build.layers {
            match programs.last_mut() {
                Some(program) if program.tool.is_named(&layer.tool.tool_name) => {
                    program.write_layer(layer)
                }
                _ => {
                    let mut program = ProgramWriter::new(
                        &self.coords,
                        workpiece,
                        layer.tool.clone(),
                        filename_template(&base, &layer.tool.tool_name),
                    );
                    program.write_layer(layer);
                    programs.push(program);
                }
            }
        }

        // Second pass: index and count are known now
        let count = programs.len();
        let files: Vec<GcodeFile> = programs
            .into_iter()
            .enumerate()
            .map(|(index, program)| {
                let (filename, tool_name, content) = program.finish();
                GcodeFile {
                    filename: substitute(&filename, index + 1, count, &extension),
                    tool_name,
                    content: substitute(&content, index + 1, count, &extension),
                }
            })
            .collect();

        info!("Rendered {} G-code file(s)", files.len());
        files
    }
}

fn comment_text(text: &str) -> String {
    text.replace('(', "[").replace(')', "]")
}

/// Emits one tool's program and tracks the machine state while doing so
struct ProgramWriter<'a> {
    coords: &'a MachineCoordinates,
    workpiece: &'a WorkpieceInfo,
    tool: TrackTool,
    filename: String,
    gcode: String,
    retracted: bool,
    depth: Option<f64>,
    location: Option<Point>,
    operation_name: Option<String>,
}

impl<'a> ProgramWriter<'a> {
    fn new(
        coords: &'a MachineCoordinates,
        workpiece: &'a WorkpieceInfo,
        tool: TrackTool,
        filename: String,
    ) -> Self {
        let mut writer = Self {
            coords,
            workpiece,
            tool,
            filename,
            gcode: String::new(),
            retracted: true,
            depth: None,
            location: None,
            operation_name: None,
        };
        writer.write_header();
        writer
    }

    fn line(&mut self, line: &str) {
        self.gcode.push_str(line);
        self.gcode.push('\n');
    }

    fn comment(&mut self, text: &str) {
        self.line(&format!("({})", comment_text(text)));
    }

    fn write_header(&mut self) {
        let material = match self.workpiece.material_type_name.trim() {
            "" => "Unspecified",
            name => name,
        }
        .to_string();
        let surface = self.top();
        let attach = format!(
            "Attach tool: {}, {}mm",
            self.tool.tool_name,
            format_decimal(self.tool.diameter)
        );

        self.line("G21;");
        self.line("G90;");
        self.retract();
        self.comment(&format!("File: {}", self.filename));
        self.comment(&format!("Material: {}", material));
        self.comment(&format!("Surface Z: {}", format_decimal(surface)));
        self.comment(&attach);
    }

    fn top(&self) -> f64 {
        self.coords.top_of_material(self.workpiece.thickness)
    }

    fn retract_line(&self) -> String {
        format!("G00 Z{};", format_decimal(self.coords.fully_retracted()))
    }

    fn retract(&mut self) {
        let line = self.retract_line();
        self.line(&line);
        self.retracted = true;
        self.depth = None;
    }

    fn to_top(&mut self) {
        let z = self.top();
        self.line(&format!("G00 Z{};", format_decimal(z)));
    }

    fn feed_to_depth(&mut self, depth: f64, feed_rate: f64) {
        let z = self.coords.plunge(self.workpiece.thickness, depth);
        self.line(&format!(
            "G01 Z{} F{};",
            format_decimal(z),
            format_decimal(feed_rate)
        ));
    }

    fn is_at(&self, point: Point) -> bool {
        self.location.is_some_and(|l| l.approx_eq(&point))
    }

    fn rapid_to(&mut self, point: Point) {
        if self.is_at(point) {
            return;
        }
        if !self.retracted {
            self.retract();
        }
        let (x, y) = self.coords.xy(point);
        self.line(&format!("G00 X{} Y{};", format_decimal(x), format_decimal(y)));
        self.location = Some(point);
    }

    fn write_layer(&mut self, layer: &TrackLayer) {
        for segment in &layer.segments {
            self.write_operation_name(segment);
            match segment.segment_type {
                TrackSegmentType::Plot => self.plot(segment),
                TrackSegmentType::Plunge => self.plunge(segment),
                TrackSegmentType::Transit => self.rapid_to(segment.end_offset),
                TrackSegmentType::None => {}
            }
        }
    }

    fn write_operation_name(&mut self, segment: &TrackSegment) {
        let name = segment
            .operation
            .and_then(|op| self.workpiece.operation(op))
            .map(|op| op.operation_name.trim())
            .filter(|name| !name.is_empty());
        if let Some(name) = name {
            if self.operation_name.as_deref() != Some(name) {
                let name = name.to_string();
                self.comment(&format!("Operation: {}", name));
                self.operation_name = Some(name);
            }
        }
    }

    fn plot(&mut self, segment: &TrackSegment) {
        self.rapid_to(segment.start_offset);

        let depth_changed = self
            .depth
            .is_none_or(|depth| (depth - segment.depth).abs() > LOCATION_TOLERANCE);
        if self.retracted {
            self.to_top();
        }
        if self.retracted || depth_changed {
            self.feed_to_depth(segment.depth, segment.feed_rate);
        }

        let (x, y) = self.coords.xy(segment.end_offset);
        self.line(&format!(
            "G01 X{} Y{} F{};",
            format_decimal(x),
            format_decimal(y),
            format_decimal(segment.feed_rate)
        ));
        self.retracted = false;
        self.depth = Some(segment.depth);
        self.location = Some(segment.end_offset);
    }

    /// Drill at a point, pecking by the tool's depth per pass
    fn plunge(&mut self, segment: &TrackSegment) {
        self.rapid_to(segment.start_offset);
        self.to_top();

        let peck = self.tool.max_depth_per_pass;
        let target = segment.depth;
        if peck <= 0.0 || target <= peck {
            self.feed_to_depth(target, segment.feed_rate);
        } else {
            let mut reached = 0.0;
            loop {
                reached = f64::min(reached + peck, target);
                if target - reached < LOCATION_TOLERANCE {
                    reached = target;
                }
                self.feed_to_depth(reached, segment.feed_rate);
                if reached >= target {
                    break;
                }
                // Clear chips
                self.to_top();
            }
        }
        self.retract();
    }

    /// Close the program with a full retract unless it already ends on one
    fn finish(mut self) -> (String, String, String) {
        let closing = self.retract_line();
        if self.gcode.lines().last() != Some(closing.as_str()) {
            self.retract();
        }
        debug!(
            "Program for '{}' is {} line(s)",
            self.tool.tool_name,
            self.gcode.lines().count()
        );
        (self.filename, self.tool.tool_name, self.gcode)
    }
}
