//! Rendering: draws the sketch scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the shape store, labels and UI state and
//! produces pixels. It never mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{GRID_CELL_PX, LABEL_FONT_PX};
use crate::geom::Point;
use crate::input::{Tool, UiState};
use crate::label::Label;
use crate::shape::{Shape, ShapeStore, SketchObject};

const BACKGROUND: &str = "#ffffff";
const GRID_COLOR: &str = "#e5e5e5";
const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.35)";
const SHADOW_BLUR_PX: f64 = 4.0;
const SELECTION_COLOR: &str = "#1E90FF";
const SELECTION_PAD_PX: f64 = 4.0;

/// Selection dash segment length in pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// What the frame is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Interactive view: grid, selection box and live stroke preview.
    Screen,
    /// Raster export: shapes and labels on a plain background.
    Export,
}

/// Read-only view of everything a frame needs.
pub struct Scene<'a> {
    pub doc: &'a ShapeStore,
    pub labels: &'a [Label],
    pub ui: &'a UiState,
    pub live_stroke: Option<&'a [Point]>,
    pub width: f64,
    pub height: f64,
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>, mode: RenderMode) -> Result<(), JsValue> {
    // Layer 1: background, plus grid on screen only.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
    if mode == RenderMode::Screen {
        draw_grid(ctx, scene.width, scene.height);
    }

    // Layer 2: shapes in creation order.
    for obj in scene.doc.sorted_objects() {
        draw_object(ctx, obj);
    }

    // Layer 3: labels.
    draw_labels(ctx, scene.labels, &scene.ui.color)?;

    if mode == RenderMode::Export {
        return Ok(());
    }

    // Layer 4: interaction chrome.
    if let Some(obj) = scene.ui.selected_id.and_then(|id| scene.doc.get(&id)) {
        draw_selection(ctx, obj)?;
    }
    if scene.ui.tool == Tool::Draw {
        if let Some(points) = scene.live_stroke {
            draw_live_stroke(ctx, points, scene.ui);
        }
    }
    Ok(())
}

// =============================================================
// Grid
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    let mut x = 0.0;
    while x <= width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        x += GRID_CELL_PX;
    }
    let mut y = 0.0;
    while y <= height {
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        y += GRID_CELL_PX;
    }
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Shapes
// =============================================================

fn draw_object(ctx: &CanvasRenderingContext2d, obj: &SketchObject) {
    let outline = obj.world_outline();
    let closed = match &obj.shape {
        Shape::Circle(_) | Shape::Rect(_) => true,
        Shape::Arc(arc) => arc.closed,
        Shape::Line(_) | Shape::Freehand(_) => false,
    };

    ctx.save();
    ctx.set_stroke_style_str(&obj.style.stroke);
    ctx.set_line_width(obj.style.stroke_width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    if obj.style.shadow {
        ctx.set_shadow_color(SHADOW_COLOR);
        ctx.set_shadow_blur(SHADOW_BLUR_PX);
        ctx.set_shadow_offset_x(1.0);
        ctx.set_shadow_offset_y(1.0);
    }
    trace_path(ctx, &outline, closed);
    ctx.stroke();
    ctx.restore();
}

fn trace_path(ctx: &CanvasRenderingContext2d, points: &[Point], closed: bool) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    if closed {
        ctx.close_path();
    }
}

// =============================================================
// Labels
// =============================================================

fn draw_labels(ctx: &CanvasRenderingContext2d, labels: &[Label], color: &str) -> Result<(), JsValue> {
    if labels.is_empty() {
        return Ok(());
    }
    ctx.save();
    ctx.set_fill_style_str(color);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("bold {LABEL_FONT_PX}px sans-serif"));
    for label in labels {
        ctx.fill_text(&label.text, label.position.x, label.position.y)?;
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Interaction chrome
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, obj: &SketchObject) -> Result<(), JsValue> {
    let Some(b) = obj.bounds() else {
        return Ok(());
    };
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(
        b.min_x - SELECTION_PAD_PX,
        b.min_y - SELECTION_PAD_PX,
        b.width() + SELECTION_PAD_PX * 2.0,
        b.height() + SELECTION_PAD_PX * 2.0,
    );
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn draw_live_stroke(ctx: &CanvasRenderingContext2d, points: &[Point], ui: &UiState) {
    ctx.save();
    ctx.set_stroke_style_str(&ui.color);
    ctx.set_line_width(ui.brush_size);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    trace_path(ctx, points, false);
    ctx.stroke();
    ctx.restore();
}
