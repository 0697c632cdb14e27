//! Input model: tools, brush settings, and the pointer gesture state machine.
//!
//! `Tool` and the brush fields of `UiState` capture the user's intent at the
//! time of a pointer event. `InputState` is the gesture being tracked between
//! pointer-down and pointer-up, carrying what is needed to emit the final
//! mutation on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE_PX};
use crate::geom::Point;
use crate::shape::ShapeId;

/// Which tool is currently active. Both tools capture freehand strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Strokes become walls or freehand paths.
    #[default]
    Draw,
    /// Strokes remove every shape their bounding box touches.
    Erase,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Theme stroke colour, applied to every shape.
    pub color: String,
    /// Brush width for new strokes, in pixels.
    pub brush_size: f64,
    /// Shape being edited after a template insert. Drawing is suspended
    /// while this is set.
    pub selected_id: Option<ShapeId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: DEFAULT_BRUSH_COLOR.to_owned(),
            brush_size: DEFAULT_BRUSH_SIZE_PX,
            selected_id: None,
        }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A freehand stroke is being sampled.
    Stroking {
        /// Points sampled so far, in canvas pixels.
        points: Vec<Point>,
    },
    /// The selected shape is being dragged.
    DraggingShape {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Pointer position at the previous event.
        last: Point,
    },
}
