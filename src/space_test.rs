#![allow(clippy::float_cmp)]

use canvas::engine::SketchReport;
use canvas::units::parse_length;

use super::*;

fn sketched_space() -> Space {
    let mut space = Space::new("Pantry", SpaceKind::Closet, Unit::Cm);
    space.sketch = Some(Completion {
        image_data_url: "data:image/png;base64,AAAA".into(),
        report: SketchReport {
            wall_measurements: vec![
                WallMeasurement { label: "A".into(), length: "254".into() },
                WallMeasurement { label: "B".into(), length: "".into() },
            ],
            total_perimeter: 254.0,
            total_area: 0.0,
        },
    });
    space
}

#[test]
fn new_space_uses_unit_default_ceiling() {
    assert_eq!(Space::new("a", SpaceKind::Kitchen, Unit::In).ceiling_height, "96");
    assert_eq!(Space::new("a", SpaceKind::Kitchen, Unit::Cm).ceiling_height, "243.84");
}

#[test]
fn convert_units_rescales_ceiling_and_measurements() {
    let mut space = sketched_space();
    space.convert_units(Unit::Cm, Unit::In);
    assert_eq!(space.ceiling_height, "96.00");

    let sketch = space.sketch.as_ref().unwrap();
    assert_eq!(sketch.report.wall_measurements[0].length, "100.00");
    assert_eq!(sketch.report.wall_measurements[1].length, "");
    assert!((sketch.report.total_perimeter - 100.0).abs() < 1e-9);
}

#[test]
fn convert_units_recomputes_totals_from_rounded_lengths() {
    let mut space = Space::new("Den", SpaceKind::Other, Unit::Cm);
    let lengths = ["10", "20.5", "100", "150"];
    space.sketch = Some(Completion {
        image_data_url: String::new(),
        report: SketchReport {
            wall_measurements: lengths
                .iter()
                .zip(["A", "B", "C", "D"])
                .map(|(length, label)| WallMeasurement { label: label.into(), length: (*length).into() })
                .collect(),
            total_perimeter: 280.5,
            total_area: 1500.0,
        },
    });

    space.convert_units(Unit::Cm, Unit::In);
    let record = space.record(Unit::In, Vec::new());

    let converted: Vec<&str> = record.wall_measurements.iter().map(|m| m.length.as_str()).collect();
    assert_eq!(converted, ["3.94", "8.07", "39.37", "59.06"]);
    let sum: f64 = record.wall_measurements.iter().map(|m| parse_length(&m.length)).sum();
    assert!((record.total_perimeter - sum).abs() < 1e-9, "perimeter {}", record.total_perimeter);
    assert!((record.total_perimeter - 110.44).abs() < 1e-9);
    assert!((record.total_area - 3.94 * 59.06).abs() < 1e-9, "area {}", record.total_area);
}

#[test]
fn convert_units_same_unit_is_a_no_op() {
    let mut space = sketched_space();
    let before = space.clone();
    space.convert_units(Unit::In, Unit::In);
    assert_eq!(space, before);
}

#[test]
fn record_serializes_persisted_shape() {
    let space = sketched_space();
    let record = space.record(Unit::Cm, vec!["https://files/x.pdf".into()]);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["name"], "Pantry");
    assert_eq!(json["type"], "closet");
    assert_eq!(json["ceilingHeight"], "243.84");
    assert_eq!(json["drawingData"], "data:image/png;base64,AAAA");
    assert_eq!(json["wallMeasurements"][0]["label"], "A");
    assert_eq!(json["unit"], "cm");
    assert_eq!(json["totalPerimeter"], 254.0);
    assert_eq!(json["totalArea"], 0.0);
    assert_eq!(json["fileUrls"][0], "https://files/x.pdf");
}

#[test]
fn record_without_sketch_has_empty_measurements() {
    let space = Space::new("Garage", SpaceKind::Garage, Unit::In);
    let record = space.record(Unit::In, Vec::new());
    assert!(record.drawing_data.is_none());
    assert!(record.wall_measurements.is_empty());
    assert_eq!(record.total_area, 0.0);
}

#[test]
fn storage_name_strips_unsafe_characters() {
    let att = Attachment::new("my plan (v2).pdf", "application/pdf", vec![1, 2, 3]);
    assert_eq!(att.storage_name(), format!("{}-my_plan__v2_.pdf", att.id));
}

#[test]
fn space_kind_serde_and_display() {
    assert_eq!(serde_json::to_string(&SpaceKind::Garage).unwrap(), "\"garage\"");
    assert_eq!(SpaceKind::Kitchen.to_string(), "Kitchen");
    assert_eq!(SpaceKind::default(), SpaceKind::Other);
}
