use shoptools_camtools::gcode::GcodeRenderer;
use shoptools_camtools::pattern::{
    CutProfile, Orientation, PatternOperation, PatternTemplate, SharedVariable,
};
use shoptools_camtools::workpiece::WorkpieceInfo;
use shoptools_core::data::{OperationAction, PropertyName, Tool};
use shoptools_core::geometry::{OffsetLeftRight, Point};
use shoptools_settings::ConfigurationProfile;

fn shelf_pins() -> PatternTemplate {
    PatternTemplate::new("Shelf Pins")
        .with_operation(
            PatternOperation::new(OperationAction::Plunge)
                .with_name("Pins")
                .with_offset_x("32mm", OffsetLeftRight::Left),
        )
        .with_operation(
            PatternOperation::new(OperationAction::Plunge)
                .with_name("Pins")
                .with_offset_x("32mm", OffsetLeftRight::Right),
        )
        .with_shared_variable(
            SharedVariable::new("Pin Depth", PropertyName::Depth, "10mm").linked_to(&[0, 1]),
        )
}

#[test]
fn test_template_to_gcode() {
    let mut config = ConfigurationProfile::new();
    config.general_cutting_tool =
        Some(Tool::new("Drill", "Drill Bit").with_property("Diameter", "5mm"));

    let cut = CutProfile::from_template(
        &shelf_pins(),
        &config.action_properties,
        Point::new(0.0, 40.0),
        Point::new(200.0, 40.0),
        Orientation::Horizontal,
    )
    .unwrap();

    let mut wp = WorkpieceInfo {
        user_length: "200mm".to_string(),
        user_width: "300mm".to_string(),
        user_depth: "18mm".to_string(),
        cuts: vec![cut],
        ..WorkpieceInfo::for_table(&config)
    };
    wp.configure_from_user_values(&config);

    let files = GcodeRenderer::new(&config).render(&wp, Some("Side"), None);

    assert_eq!(files.len(), 1);
    let content = &files[0].content;
    // Right-origin offset measures back from the end of the 200mm pattern
    assert!(content.contains("G00 X32 Y40;"));
    assert!(content.contains("G00 X168 Y40;"));
    // 2.5mm per peck down to 10mm
    assert_eq!(content.matches("G01 Z-142 F600;").count(), 2);
    assert_eq!(content.matches("(Operation: Pins)").count(), 1);
}

#[test]
fn test_workpiece_from_json() {
    let json = r#"{
        "user_length": "12in",
        "user_width": "8in",
        "user_depth": "3/4in",
        "workspace_area": { "location": { "x": 0, "y": 0 }, "length": 1250, "width": 1250 },
        "material_type_name": "MDF",
        "cuts": [
            {
                "start_location": { "x": 0, "y": 100 },
                "end_location": { "x": 304.8, "y": 100 },
                "tool_sequence_strict": true,
                "operations": [
                    {
                        "action": "Plot",
                        "operation_name": "Dado",
                        "properties": { "depth": "1/4in", "offset_x_origin": "Right", "offset_x": "0" }
                    }
                ]
            }
        ]
    }"#;

    let config = ConfigurationProfile::new();
    let mut wp: WorkpieceInfo = serde_json::from_str(json).unwrap();
    wp.configure_from_user_values(&config);

    assert!((wp.thickness - 19.05).abs() < 1e-9);
    assert!((wp.cuts[0].length_mm(&config) - 304.8).abs() < 1e-9);
    assert_eq!(wp.cuts[0].operations[0].tool, "");
    assert!(wp.cuts[0].tool_sequence_strict);
}
