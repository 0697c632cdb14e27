#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_draw() {
    assert_eq!(Tool::default(), Tool::Draw);
}

#[test]
fn tool_variants_distinct() {
    assert_ne!(Tool::Draw, Tool::Erase);
}

#[test]
fn tool_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Erase).unwrap(), "\"erase\"");
    let t: Tool = serde_json::from_str("\"draw\"").unwrap();
    assert_eq!(t, Tool::Draw);
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Draw);
    assert_eq!(ui.color, DEFAULT_BRUSH_COLOR);
    assert_eq!(ui.brush_size, DEFAULT_BRUSH_SIZE_PX);
    assert!(ui.selected_id.is_none());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}

#[test]
fn stroking_carries_points() {
    let state = InputState::Stroking { points: vec![Point::new(1.0, 2.0)] };
    let InputState::Stroking { points } = state else {
        panic!("expected stroking");
    };
    assert_eq!(points, vec![Point::new(1.0, 2.0)]);
}
