use shoptools_camtools::gcode::GcodeRenderer;
use shoptools_camtools::pattern::{CutProfile, PatternOperation};
use shoptools_camtools::track::TrackBuilder;
use shoptools_camtools::workpiece::WorkpieceInfo;
use shoptools_core::data::{OperationAction, Tool};
use shoptools_core::geometry::DirectionLeftRight;
use shoptools_settings::{ConfigurationProfile, ZOrigin};

fn config() -> ConfigurationProfile {
    let mut config = ConfigurationProfile::new();
    config.general_cutting_tool =
        Some(Tool::new("General", "Straight Bit").with_property("Diameter", "6.35mm"));
    for name in ["A", "B", "C"] {
        config
            .user_tools
            .push(Tool::new(name, "Straight Bit").with_property("Diameter", "6mm"));
    }
    config
}

fn workpiece(config: &ConfigurationProfile, operations: Vec<PatternOperation>) -> WorkpieceInfo {
    let mut workpiece = WorkpieceInfo {
        user_length: "300mm".to_string(),
        user_width: "200mm".to_string(),
        user_depth: "18mm".to_string(),
        material_type_name: "Plywood".to_string(),
        ..WorkpieceInfo::for_table(config)
    };
    if !operations.is_empty() {
        workpiece.cuts.push(CutProfile {
            operations,
            ..Default::default()
        });
    }
    workpiece.configure_from_user_values(config);
    workpiece
}

fn plot(tool: &str, x: &str, y: &str) -> PatternOperation {
    PatternOperation::new(OperationAction::Plot)
        .with_tool(tool)
        .with_depth("2mm")
        .with_offset(x, y)
}

#[test]
fn test_same_depth_plots_plunge_once() {
    let config = config();
    let wp = workpiece(&config, vec![plot("", "50", "0"), plot("", "100", "0")]);

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    assert_eq!(files.len(), 1);
    let content = &files[0].content;
    let plunges = content.lines().filter(|l| l.starts_with("G01 Z")).count();
    assert_eq!(plunges, 1);
    assert!(content.contains("G01 Z-134 F1200;"));
    assert!(content.contains("G01 X50 Y0 F1200;\nG01 X100 Y0 F1200;\n"));
}

#[test]
fn test_depth_change_replunges_without_retract() {
    let config = config();
    let wp = workpiece(
        &config,
        vec![
            plot("", "50", "0"),
            plot("", "100", "0").with_depth("3mm"),
        ],
    );

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    let body: Vec<_> = files[0].content.lines().skip(7).collect();
    assert_eq!(
        body,
        vec![
            "G00 X0 Y0;",
            "G00 Z-132;",
            "G01 Z-134 F1200;",
            "G01 X50 Y0 F1200;",
            "G01 Z-135 F1200;",
            "G01 X100 Y0 F1200;",
            "G00 Z0;",
        ]
    );
}

#[test]
fn test_alternating_tools_give_one_file_per_tool() {
    let config = config();
    let wp = workpiece(
        &config,
        vec![
            plot("A", "50", "0"),
            plot("B", "100", "0"),
            plot("A", "150", "0"),
            plot("B", "200", "0"),
        ],
    );

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    assert_eq!(files.len(), 2);
    for file in &files {
        let lines: Vec<_> = file.content.lines().collect();
        assert_eq!(lines[0], "G21;");
        assert_eq!(lines[1], "G90;");
        assert_eq!(lines.last(), Some(&"G00 Z0;"));
    }
    assert_eq!(files[0].tool_name, "A");
    assert_eq!(files[1].tool_name, "B");
}

#[test]
fn test_empty_workpiece_renders_nothing() {
    let config = config();
    let wp = workpiece(&config, Vec::new());
    assert!(GcodeRenderer::new(&config).render(&wp, None, None).is_empty());
}

#[test]
fn test_filename_templating() {
    let config = config();
    let wp = workpiece(
        &config,
        vec![
            plot("C", "50", "0"),
            plot("A", "100", "0"),
            plot("B", "150", "0"),
        ],
    );

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job1"), None);

    let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(
        names,
        vec!["Job1-01of03-C.gcode", "Job1-02of03-A.gcode", "Job1-03of03-B.gcode"]
    );
    assert!(files[1].content.contains("(File: Job1-02of03-A.gcode)"));
    assert!(!files[2].content.contains("{File"));
}

#[test]
fn test_custom_extension() {
    let config = config();
    let wp = workpiece(&config, vec![plot("A", "50", "0")]);
    let files = GcodeRenderer::new(&config).render(&wp, Some("Panel"), Some("nc"));
    assert_eq!(files[0].filename, "Panel-01of01-A.nc");
}

#[test]
fn test_default_base_name() {
    let config = config();
    let wp = workpiece(&config, vec![plot("A", "50", "0")]);
    let files = GcodeRenderer::new(&config).render(&wp, None, None);
    assert!(files[0].filename.starts_with("ShopTools-"));
    assert!(files[0].filename.ends_with("-01of01-A.gcode"));
}

#[test]
fn test_header_block() {
    let config = config();
    let wp = workpiece(&config, vec![plot("A", "50", "0")]);

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    let header: Vec<_> = files[0].content.lines().take(7).collect();
    assert_eq!(
        header,
        vec![
            "G21;",
            "G90;",
            "G00 Z0;",
            "(File: Job-01of01-A.gcode)",
            "(Material: Plywood)",
            "(Surface Z: -132)",
            "(Attach tool: A, 6mm)",
        ]
    );
}

#[test]
fn test_operation_name_comments() {
    let config = config();
    let wp = workpiece(
        &config,
        vec![
            plot("", "50", "0").with_name("Groove"),
            plot("", "100", "0").with_name("Groove"),
            PatternOperation::new(OperationAction::Plunge)
                .with_name("Pilot (hole)")
                .with_depth("2mm")
                .with_offset("150", "50"),
        ],
    );

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    let content = &files[0].content;
    assert_eq!(content.matches("(Operation: Groove)").count(), 1);
    assert!(content.contains("(Operation: Pilot [hole])"));
}

#[test]
fn test_bottom_z_origin() {
    let mut config = config();
    config.axes.z_origin = ZOrigin::Bottom;
    let wp = workpiece(&config, vec![plot("A", "50", "0")]);

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    let content = &files[0].content;
    assert!(content.starts_with("G21;\nG90;\nG00 Z150;\n"));
    assert!(content.contains("(Surface Z: 18)"));
    assert!(content.contains("G01 Z16 F1200;"));
}

#[test]
fn test_bad_tool_does_not_block_render() {
    let config = config();
    let wp = workpiece(&config, vec![plot("Missing", "50", "0"), plot("A", "100", "0")]);

    let renderer = GcodeRenderer::new(&config);
    let build = TrackBuilder::new(&config).build(&wp);
    assert_eq!(build.diagnostics.len(), 1);

    let files = renderer.render_build(&wp, &build, Some("Job"), None);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].tool_name, "A");
}

#[test]
fn test_write_to_directory() {
    let config = config();
    let wp = workpiece(&config, vec![plot("A", "50", "0")]);
    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    let dir = tempfile::tempdir().unwrap();
    let path = files[0].write_to(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("Job-01of01-A.gcode"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), files[0].content);
}

/// Tool A around a 100mm square, counter-clockwise with the kerf inside
fn inside_square() -> Vec<PatternOperation> {
    let mut operations =
        vec![PatternOperation::new(OperationAction::Transit).with_offset("50", "50")];
    for (x, y) in [("150", "50"), ("150", "150"), ("50", "150"), ("50", "50")] {
        operations.push(plot("A", x, y).with_direction(DirectionLeftRight::Left));
    }
    operations
}

fn feed_moves(content: &str) -> Vec<(f64, f64)> {
    content
        .lines()
        .filter(|l| l.starts_with("G01 X"))
        .map(|l| {
            let value = |axis: char| {
                l.split_whitespace()
                    .find_map(|word| word.strip_prefix(axis))
                    .and_then(|v| v.trim_end_matches(';').parse::<f64>().ok())
                    .unwrap()
            };
            (value('X'), value('Y'))
        })
        .collect()
}

#[test]
fn test_kerf_contour_is_cut_in_one_plunge() {
    let config = config();
    let wp = workpiece(&config, inside_square());

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    assert_eq!(files.len(), 1);
    let content = &files[0].content;
    let plunges = content.lines().filter(|l| l.starts_with("G01 Z")).count();
    assert_eq!(plunges, 1);
    // Header retract and closing retract only
    assert_eq!(content.matches("G00 Z0;").count(), 2);

    let moves = feed_moves(content);
    assert_eq!(moves, vec![(147.0, 53.0), (147.0, 147.0), (53.0, 147.0), (53.0, 53.0)]);
    // The 6mm cutter stays inside the square
    assert!(moves
        .iter()
        .all(|(x, y)| (53.0..=147.0).contains(x) && (53.0..=147.0).contains(y)));
    assert!(content.contains("G00 X53 Y53;\nG00 Z-132;\nG01 Z-134 F1200;\n"));
}

#[test]
fn test_program_ending_in_plunge_retracts_once() {
    let config = config();
    let wp = workpiece(
        &config,
        vec![PatternOperation::new(OperationAction::Plunge)
            .with_tool("A")
            .with_depth("2mm")
            .with_offset("40", "40")],
    );

    let files = GcodeRenderer::new(&config).render(&wp, Some("Job"), None);

    let content = &files[0].content;
    assert!(content.ends_with("G01 Z-134 F1200;\nG00 Z0;\n"));
    assert_eq!(content.matches("G00 Z0;").count(), 2);
}
