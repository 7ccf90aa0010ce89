//! Track layer builder
//!
//! Turns a workpiece's cuts into tool-grouped motion segments in three
//! passes:
//!
//! 1. Geometry: every operation of every cut is resolved to a start and end
//!    point in table coordinates, a depth, and a tool. Operations whose tool
//!    cannot be resolved, or whose depth or location is unusable, are
//!    dropped and reported. Kerf-compensated plots are offset as chains.
//! 2. Ordering: strict cuts keep their literal order. Runs of non-strict
//!    cuts are pooled and stably clustered by tool so each tool is attached
//!    once.
//! 3. Segments: operations become Plot, Plunge and Transit segments, split
//!    into layers at every tool change. Plots deeper than the tool can take
//!    in one pass are cut in several.

use super::feed::resolve_feed_rate;
use super::kerf::{offset_chain, KerfLine};
use super::segment::{TrackLayer, TrackSegment};
use super::tools::{TrackTool, TrackTools};
use crate::error::TrackError;
use crate::pattern::{CutProfile, PatternOperation};
use crate::workpiece::{OperationRef, WorkpieceInfo};
use shoptools_core::data::OperationAction;
use shoptools_core::geometry::{DirectionLeftRight, Point};
use shoptools_core::measurement::parse_angle;
use shoptools_core::units::format_decimal;
use shoptools_settings::ConfigurationProfile;
use std::mem;
use tracing::{debug, info, warn};

/// Most passes one plot or plunge may be split into
pub const MAX_PASSES: usize = 1000;

/// Result of a build: layers ready to render plus what went wrong
#[derive(Debug, Clone, PartialEq)]
pub struct TrackBuild {
    pub layers: Vec<TrackLayer>,
    pub tools: Vec<TrackTool>,
    /// mm/min
    pub feed_rate: f64,
    /// Operations that were skipped, and why
    pub diagnostics: Vec<TrackError>,
}

impl TrackBuild {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.segments.len()).sum()
    }
}

/// An operation resolved against the workpiece and tool set
#[derive(Debug, Clone)]
struct PlannedOperation {
    source: OperationRef,
    action: OperationAction,
    tool: usize,
    start: Point,
    end: Point,
    depth: f64,
}

struct PlannedCut {
    strict: bool,
    operations: Vec<PlannedOperation>,
}

/// Builds track layers from a workpiece
pub struct TrackBuilder<'a> {
    config: &'a ConfigurationProfile,
}

impl<'a> TrackBuilder<'a> {
    pub fn new(config: &'a ConfigurationProfile) -> Self {
        Self { config }
    }

    pub fn build(&self, workpiece: &WorkpieceInfo) -> TrackBuild {
        let tools = TrackTools::initialize(self.config, &workpiece.cuts);
        let feed_rate = resolve_feed_rate(self.config, &workpiece.material_type_name);
        let mut diagnostics = Vec::new();

        let planned: Vec<PlannedCut> = workpiece
            .cuts
            .iter()
            .enumerate()
            .map(|(index, cut)| self.plan_cut(workpiece, index, cut, &tools, &mut diagnostics))
            .collect();

        let ordered = order_operations(planned);
        let layers = build_layers(&ordered, &tools, workpiece.router_location, feed_rate);

        for diagnostic in &diagnostics {
            warn!("Skipped operation: {}", diagnostic);
        }
        let build = TrackBuild {
            layers,
            tools: tools.into_vec(),
            feed_rate,
            diagnostics,
        };
        info!(
            "Built {} track layer(s), {} segment(s) from {} cut(s)",
            build.layers.len(),
            build.segment_count(),
            workpiece.cuts.len()
        );
        build
    }

    /// Pass 1: geometry, depth and tool for every operation of a cut
    fn plan_cut(
        &self,
        workpiece: &WorkpieceInfo,
        cut_index: usize,
        cut: &CutProfile,
        tools: &TrackTools,
        diagnostics: &mut Vec<TrackError>,
    ) -> PlannedCut {
        let length = cut.length_mm(self.config);
        let width = cut.width_mm(self.config);
        let to_table = |local: Point| workpiece.to_table(cut.to_workpiece(local));
        let z_travel = self.config.table_depth_mm();

        let mut current = Point::default();
        let mut resolved: Vec<(PlannedOperation, Option<usize>)> = Vec::new();
        let mut kerf_lines: Vec<Option<KerfLine>> = Vec::new();

        for (index, op) in cut.operations.iter().enumerate() {
            let source = OperationRef::new(cut_index, index);
            let start = current;
            let end = match op.action {
                OperationAction::None => continue,
                OperationAction::Plot if op.properties.length.is_some() => {
                    self.along_angle(op, current)
                }
                _ => self.offset_target(op, current, length, width),
            };
            if !end.is_finite() {
                diagnostics.push(TrackError::InvalidLocation { operation: source });
                continue;
            }
            current = end;

            let tool = if op.action.is_cutting() {
                match tools.position(&op.tool) {
                    Some(tool) => Some(tool),
                    None => {
                        diagnostics.push(unresolved(op, source));
                        continue;
                    }
                }
            } else {
                None
            };

            let (start, end) = match op.action {
                OperationAction::Plunge => (to_table(end), to_table(end)),
                _ => (to_table(start), to_table(end)),
            };
            if !start.is_finite() || !end.is_finite() {
                diagnostics.push(TrackError::InvalidLocation { operation: source });
                continue;
            }
            let side = op.properties.direction.unwrap_or_default();
            let kerf_line = match (op.action, tool) {
                (OperationAction::Plot, Some(tool))
                    if side != DirectionLeftRight::None && !start.approx_eq(&end) =>
                {
                    Some(KerfLine {
                        side,
                        clearance: tools.tools()[tool].kerf_clearance,
                        start,
                        end,
                    })
                }
                _ => None,
            };

            let depth = match op.properties.depth.as_deref() {
                Some(text) => self.config.to_mm(text),
                None => workpiece.thickness,
            };
            if let Some(tool) = tool {
                if let Err(reason) = check_depth(depth, &tools.tools()[tool], z_travel) {
                    diagnostics.push(TrackError::InvalidDepth {
                        depth,
                        reason,
                        operation: source,
                    });
                    continue;
                }
            }

            resolved.push((
                PlannedOperation {
                    source,
                    action: op.action,
                    tool: 0,
                    start,
                    end,
                    depth,
                },
                tool,
            ));
            kerf_lines.push(kerf_line);
        }
        let resolved = compensate_kerf(resolved, &kerf_lines);

        // Transits ride along with the nearest cutting tool of their cut
        let default_tool = tools.position("");
        let mut operations = Vec::with_capacity(resolved.len());
        for (index, (mut planned, tool)) in resolved.iter().cloned().enumerate() {
            let tool = tool.or_else(|| {
                let next = resolved[index + 1..].iter().find_map(|(_, t)| *t);
                let previous = resolved[..index].iter().rev().find_map(|(_, t)| *t);
                next.or(previous).or(default_tool)
            });
            match tool {
                Some(tool) => {
                    planned.tool = tool;
                    operations.push(planned);
                }
                None => debug!("Dropping transit {} with no tool to carry it", planned.source),
            }
        }

        PlannedCut {
            strict: cut.tool_sequence_strict,
            operations,
        }
    }

    /// Target of an offset-positioned operation in the cut's local frame
    ///
    /// A blank offset keeps the current coordinate on that axis.
    fn offset_target(
        &self,
        op: &PatternOperation,
        current: Point,
        length: f64,
        width: f64,
    ) -> Point {
        let props = &op.properties;
        let u = match props.offset_x.as_deref() {
            Some(text) => props
                .offset_x_origin
                .unwrap_or_default()
                .resolve(self.config.to_mm(text), length),
            None => current.x,
        };
        let v = match props.offset_y.as_deref() {
            Some(text) => props
                .offset_y_origin
                .unwrap_or_default()
                .resolve(self.config.to_mm(text), width),
            None => current.y,
        };
        Point::new(u, v)
    }

    /// End of a length/angle plot; the angle runs counter-clockwise from +u
    fn along_angle(&self, op: &PatternOperation, current: Point) -> Point {
        let length = self
            .config
            .to_mm(op.properties.length.as_deref().unwrap_or_default());
        let angle = parse_angle(op.properties.angle.as_deref().unwrap_or_default()).to_radians();
        current.translated(length * angle.cos(), length * angle.sin())
    }
}

/// Replace kerf-compensated plots by their offset paths. Consecutive plots
/// that connect end to start on the same tool and side are offset as one
/// chain, closed when the last one ends where the first began.
fn compensate_kerf(
    resolved: Vec<(PlannedOperation, Option<usize>)>,
    kerf_lines: &[Option<KerfLine>],
) -> Vec<(PlannedOperation, Option<usize>)> {
    let mut compensated = Vec::with_capacity(resolved.len());
    let mut index = 0;

    while index < resolved.len() {
        let Some(first) = kerf_lines[index] else {
            compensated.push(resolved[index].clone());
            index += 1;
            continue;
        };
        let tool = resolved[index].1;
        let mut chain = vec![first];
        while let Some(next) = kerf_lines.get(index + chain.len()).copied().flatten() {
            let continues = chain.last().is_some_and(|last| last.continues_into(&next));
            if !continues || resolved[index + chain.len()].1 != tool {
                break;
            }
            chain.push(next);
        }
        let closed = chain.len() > 1 && chain[chain.len() - 1].end.approx_eq(&first.start);

        let members = &resolved[index..index + chain.len()];
        for (path, (planned, tool)) in offset_chain(&chain, closed).into_iter().zip(members) {
            let line = PlannedOperation {
                start: path.start,
                end: path.end,
                ..planned.clone()
            };
            let mut from = line.end;
            compensated.push((line, *tool));
            for to in path.join {
                let corner = PlannedOperation {
                    start: from,
                    end: to,
                    ..planned.clone()
                };
                compensated.push((corner, *tool));
                from = to;
            }
        }
        if chain.len() > 1 {
            debug!(
                "Offset {} connected plot(s) as one {} path",
                chain.len(),
                if closed { "closed" } else { "open" }
            );
        }
        index += chain.len();
    }
    compensated
}

/// A depth the machine can reach and the tool can cut in at most
/// [`MAX_PASSES`] passes
fn check_depth(depth: f64, tool: &TrackTool, z_travel: f64) -> Result<(), String> {
    if !depth.is_finite() {
        return Err("not a finite number".to_string());
    }
    if depth < 0.0 {
        return Err("negative".to_string());
    }
    if z_travel > 0.0 && depth > z_travel {
        return Err(format!(
            "deeper than the {}mm Z travel",
            format_decimal(z_travel)
        ));
    }
    if tool.max_depth_per_pass > 0.0 && depth / tool.max_depth_per_pass > MAX_PASSES as f64 {
        return Err(format!(
            "more than {} passes with '{}'",
            MAX_PASSES, tool.tool_name
        ));
    }
    Ok(())
}

fn unresolved(op: &PatternOperation, operation: OperationRef) -> TrackError {
    let tool_name = op.tool.trim();
    if tool_name.is_empty() {
        TrackError::NoDefaultTool { operation }
    } else {
        TrackError::UnresolvedTool {
            tool_name: tool_name.to_string(),
            operation,
        }
    }
}

/// Pass 2: strict cuts verbatim, runs of relaxed cuts clustered by tool
fn order_operations(cuts: Vec<PlannedCut>) -> Vec<PlannedOperation> {
    let mut ordered: Vec<PlannedOperation> = Vec::new();
    let mut pool = Vec::new();

    for cut in cuts {
        if cut.strict {
            flush_pool(&mut pool, &mut ordered);
            ordered.extend(cut.operations);
        } else {
            pool.extend(cut.operations);
        }
    }
    flush_pool(&mut pool, &mut ordered);
    ordered
}

fn flush_pool(pool: &mut Vec<PlannedOperation>, ordered: &mut Vec<PlannedOperation>) {
    if pool.is_empty() {
        return;
    }
    let previous = ordered.last().map(|p| p.tool);
    let mut pool = mem::take(pool);
    cluster_by_tool(&mut pool, previous);
    ordered.append(&mut pool);
}

/// Stable clustering by tool in first-occurrence order (A,B,A,C becomes
/// A,A,B,C). The tool already attached, if used here, goes first.
fn cluster_by_tool(operations: &mut [PlannedOperation], attached: Option<usize>) {
    let mut rank: Vec<usize> = Vec::new();
    if let Some(tool) = attached.filter(|t| operations.iter().any(|p| p.tool == *t)) {
        rank.push(tool);
    }
    for op in operations.iter() {
        if !rank.contains(&op.tool) {
            rank.push(op.tool);
        }
    }
    operations.sort_by_key(|op| rank.iter().position(|t| *t == op.tool));
}

/// Pass 3: segments, one layer per run of operations sharing a tool
fn build_layers(
    ordered: &[PlannedOperation],
    tools: &TrackTools,
    router_location: Point,
    feed_rate: f64,
) -> Vec<TrackLayer> {
    let mut layers = Vec::new();
    let mut segments = Vec::new();
    let mut active: Option<usize> = None;
    let mut location = Some(router_location);

    for planned in ordered {
        if active != Some(planned.tool) {
            if let Some(tool) = active {
                push_layer(&mut layers, &tools.tools()[tool], mem::take(&mut segments));
                // Position is unknown after a tool change
                location = None;
            }
            active = Some(planned.tool);
        }
        let tool = &tools.tools()[planned.tool];
        append_segments(planned, tool, feed_rate, &mut location, &mut segments);
    }
    if let Some(tool) = active {
        push_layer(&mut layers, &tools.tools()[tool], segments);
    }
    layers
}

fn push_layer(layers: &mut Vec<TrackLayer>, tool: &TrackTool, segments: Vec<TrackSegment>) {
    if segments.is_empty() {
        return;
    }
    layers.push(TrackLayer {
        tool: tool.clone(),
        segments,
    });
}

fn is_at(location: Option<Point>, point: Point) -> bool {
    location.is_some_and(|l| l.approx_eq(&point))
}

fn transit_to(location: &mut Option<Point>, target: Point, segments: &mut Vec<TrackSegment>) {
    if !is_at(*location, target) {
        segments.push(TrackSegment::transit(location.unwrap_or(target), target));
    }
    *location = Some(target);
}

fn append_segments(
    planned: &PlannedOperation,
    tool: &TrackTool,
    feed_rate: f64,
    location: &mut Option<Point>,
    segments: &mut Vec<TrackSegment>,
) {
    let source = Some(planned.source);
    match planned.action {
        OperationAction::Transit => {
            if is_at(*location, planned.end) {
                return;
            }
            let start = location.unwrap_or(planned.start);
            segments.push(TrackSegment::transit(start, planned.end).for_operation(source));
            *location = Some(planned.end);
        }
        OperationAction::Plunge => {
            transit_to(location, planned.start, segments);
            segments.push(
                TrackSegment::plunge(planned.start, planned.depth, feed_rate).for_operation(source),
            );
        }
        OperationAction::Plot => {
            if planned.start.approx_eq(&planned.end) {
                warn!("Skipping zero-length plot {}", planned.source);
                return;
            }
            transit_to(location, planned.start, segments);
            for (from, to, depth) in plot_passes(planned, tool.max_depth_per_pass) {
                segments.push(
                    TrackSegment::plot(from, to, depth, planned.depth, feed_rate)
                        .for_operation(source),
                );
            }
            *location = Some(planned.end);
        }
        OperationAction::None => {}
    }
}

/// Passes for a plot: evenly increasing depth, alternating direction, with a
/// closing full-depth pass when needed to finish at the nominal end
fn plot_passes(planned: &PlannedOperation, max_depth: f64) -> Vec<(Point, Point, f64)> {
    let depth = planned.depth;
    if max_depth <= 0.0 || depth <= max_depth {
        return vec![(planned.start, planned.end, depth)];
    }

    let count = (depth / max_depth - 1e-9).ceil() as usize;
    let mut passes: Vec<_> = (1..=count)
        .map(|pass| {
            let pass_depth = depth * pass as f64 / count as f64;
            if pass % 2 == 1 {
                (planned.start, planned.end, pass_depth)
            } else {
                (planned.end, planned.start, pass_depth)
            }
        })
        .collect();
    if count % 2 == 0 {
        passes.push((planned.start, planned.end, depth));
    }
    passes
}
