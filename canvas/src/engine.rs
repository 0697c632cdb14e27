use serde::Serialize;
use tracing::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{
    CANVAS_HEIGHT_PX, CANVAS_WIDTH_PX, HIT_SLOP_PX, MOBILE_BREAKPOINT_PX, MOBILE_CANVAS_HEIGHT_PX,
    MOBILE_CANVAS_WIDTH_PX,
};
use crate::error::SketchError;
use crate::geom::Point;
use crate::hit;
use crate::history::{CanvasSnapshot, History};
use crate::input::{InputState, Tool, UiState};
use crate::label::{self, Label};
use crate::ledger::{Ledger, WallMeasurement};
use crate::render::{self, RenderMode, Scene};
use crate::shape::{Shape, ShapeId, ShapeStore, Style, Transform};
use crate::stroke;
use crate::template::{self, Template};
use crate::units::Unit;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from edits for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sketch content changed: re-render and send a fresh completion.
    Changed,
    /// Only the view changed (live stroke, drag preview, selection, size).
    RenderNeeded,
    /// A shape is selected for editing; drawing is suspended until confirmed.
    ShapeSelected(ShapeId),
    /// Undo on an empty canvas. Nothing was mutated.
    NothingToUndo,
}

/// What the browser engine must do after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    /// Redraw the canvas.
    pub render: bool,
    /// Export the sketch and invoke the host completion callback.
    pub complete: bool,
}

/// Decide the follow-up work for a batch of actions.
///
/// Any content change sends a completion and redraws. View-only actions
/// redraw without notifying the host. An empty undo does neither.
#[must_use]
pub fn effects_of(actions: &[Action]) -> Effects {
    let complete = actions.contains(&Action::Changed);
    let render = complete
        || actions
            .iter()
            .any(|a| matches!(a, Action::RenderNeeded | Action::ShapeSelected(_)));
    Effects { render, complete }
}

/// Measurements and derived totals, as handed to the host after each edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchReport {
    pub wall_measurements: Vec<WallMeasurement>,
    pub total_perimeter: f64,
    pub total_area: f64,
}

/// Payload of the host completion callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// PNG data URL of the sketch without the background grid.
    pub image_data_url: String,
    #[serde(flatten)]
    pub report: SketchReport,
}

/// Canvas size for a viewport width: the mobile size below the breakpoint.
#[must_use]
pub fn canvas_size_for(viewport_width: f64) -> (f64, f64) {
    if viewport_width < MOBILE_BREAKPOINT_PX {
        (MOBILE_CANVAS_WIDTH_PX, MOBILE_CANVAS_HEIGHT_PX)
    } else {
        (CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX)
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: ShapeStore,
    pub ledger: Ledger,
    pub history: History,
    pub ui: UiState,
    pub input: InputState,
    pub unit: Unit,
    /// Space whose sketch is loaded; switching spaces resets the canvas.
    pub space_id: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: ShapeStore::new(),
            ledger: Ledger::new(),
            history: History::new(),
            ui: UiState::default(),
            input: InputState::default(),
            unit: Unit::default(),
            space_id: None,
            width: CANVAS_WIDTH_PX,
            height: CANVAS_HEIGHT_PX,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine sized for the given viewport width, using `unit` for lengths.
    #[must_use]
    pub fn with_viewport(viewport_width: f64, unit: Unit) -> Self {
        let (width, height) = canvas_size_for(viewport_width);
        Self { unit, width, height, ..Self::default() }
    }

    // --- Brush ---

    /// Switch between draw and erase. Existing shapes are untouched.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
        self.input = InputState::Idle;
    }

    /// Set the theme colour. Every existing shape is repainted with it.
    pub fn set_color(&mut self, color: &str) -> Vec<Action> {
        color.clone_into(&mut self.ui.color);
        if self.doc.is_empty() {
            return vec![Action::RenderNeeded];
        }
        self.doc.recolor_all(color);
        self.record();
        vec![Action::Changed]
    }

    /// Brush width for subsequent strokes.
    pub fn set_size(&mut self, px: f64) {
        self.ui.brush_size = px;
    }

    fn brush_style(&self, shadow: bool) -> Style {
        Style { stroke: self.ui.color.clone(), stroke_width: self.ui.brush_size, shadow }
    }

    // --- Strokes ---

    /// Handle a finished freehand stroke according to the active tool.
    ///
    /// Ignored while a template is selected for editing.
    pub fn on_stroke_complete(&mut self, points: &[Point]) -> Vec<Action> {
        if self.ui.selected_id.is_some() {
            return Vec::new();
        }
        match self.ui.tool {
            Tool::Draw => self.commit_stroke(points),
            Tool::Erase => self.erase_stroke(points),
        }
    }

    fn commit_stroke(&mut self, points: &[Point]) -> Vec<Action> {
        let Some(outcome) = stroke::normalize(points) else {
            return Vec::new();
        };
        let straightened = outcome.is_straightened();
        let style = self.brush_style(straightened);
        let id = self.doc.insert(outcome.into_shape(), style);
        self.ledger.push_shape(id, &[""]);
        debug!(shape = %id, straightened, "stroke committed");
        self.record();
        vec![Action::Changed]
    }

    fn erase_stroke(&mut self, points: &[Point]) -> Vec<Action> {
        let Some(eraser) = stroke::eraser_bounds(points) else {
            return Vec::new();
        };
        let targets = hit::erase_targets(&eraser, &self.doc);
        if targets.is_empty() {
            return Vec::new();
        }
        for id in &targets {
            self.remove_shape(id);
        }
        debug!(erased = targets.len(), "eraser stroke applied");
        self.record();
        vec![Action::Changed]
    }

    // --- Templates ---

    /// Insert a template at the canvas centre and select it for editing.
    pub fn insert_template(&mut self, template: Template) -> Vec<Action> {
        let shape = template.shape(self.center());
        let id = self.doc.insert(shape, self.brush_style(false));
        self.ledger.push_shape(id, template.presets());
        self.ui.selected_id = Some(id);
        self.input = InputState::Idle;
        debug!(shape = %id, ?template, "template inserted");
        self.record();
        vec![Action::Changed, Action::ShapeSelected(id)]
    }

    /// Insert the five-wall quick room. Its segments carry no labels and no
    /// ledger entries.
    pub fn insert_quick_room(&mut self) -> Vec<Action> {
        for wall in template::quick_room(self.center()) {
            self.doc.insert(Shape::Line(wall), self.brush_style(false));
        }
        self.record();
        vec![Action::Changed]
    }

    /// Resume drawing after editing a selected template.
    pub fn confirm_selection(&mut self) -> Vec<Action> {
        if self.ui.selected_id.take().is_none() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    /// Select an existing shape for move/scale/rotate editing.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::UnknownShape`] if the shape isn't on the canvas.
    pub fn select(&mut self, id: ShapeId) -> Result<Vec<Action>, SketchError> {
        if self.doc.get(&id).is_none() {
            return Err(SketchError::UnknownShape(id));
        }
        self.ui.selected_id = Some(id);
        self.input = InputState::Idle;
        Ok(vec![Action::ShapeSelected(id)])
    }

    // --- Transforms ---

    /// Replace a shape's move/scale/rotate transform. Its labels follow.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::UnknownShape`] if the shape isn't on the canvas.
    pub fn transform_shape(&mut self, id: ShapeId, transform: Transform) -> Result<Vec<Action>, SketchError> {
        if !self.doc.set_transform(&id, transform) {
            return Err(SketchError::UnknownShape(id));
        }
        self.record();
        Ok(vec![Action::Changed])
    }

    fn translate_shape(&mut self, id: ShapeId, dx: f64, dy: f64) -> bool {
        let Some(obj) = self.doc.get(&id) else {
            return false;
        };
        let mut t = obj.transform;
        t.dx += dx;
        t.dy += dy;
        self.doc.set_transform(&id, t)
    }

    // --- Pointer input ---

    /// Start a stroke, or start dragging the selected shape when it is grabbed.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        if let Some(id) = self.ui.selected_id {
            if hit::hit_test(pt, &self.doc, HIT_SLOP_PX) == Some(id) {
                self.input = InputState::DraggingShape { id, last: pt };
            }
            return Vec::new();
        }
        self.input = InputState::Stroking { points: vec![pt] };
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Stroking { points } => {
                points.push(pt);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingShape { id, last } => {
                let (id, dx, dy) = (*id, pt.x - last.x, pt.y - last.y);
                *last = pt;
                if self.translate_shape(id, dx, dy) {
                    vec![Action::RenderNeeded]
                } else {
                    self.input = InputState::Idle;
                    Vec::new()
                }
            }
        }
    }

    /// Finish the active gesture.
    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Stroking { mut points } => {
                if points.last() != Some(&pt) {
                    points.push(pt);
                }
                self.on_stroke_complete(&points)
            }
            InputState::DraggingShape { id, last } => {
                self.translate_shape(id, pt.x - last.x, pt.y - last.y);
                self.record();
                vec![Action::Changed]
            }
        }
    }

    /// Points of the stroke in progress, for live preview.
    #[must_use]
    pub fn live_stroke(&self) -> Option<&[Point]> {
        match &self.input {
            InputState::Stroking { points } => Some(points),
            _ => None,
        }
    }

    // --- Measurements ---

    /// Store user text for a wall label.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::UnknownLabel`] if no wall carries `label`.
    pub fn set_length(&mut self, label: &str, value: &str) -> Result<Vec<Action>, SketchError> {
        self.ledger.set_length(label, value)?;
        self.record();
        Ok(vec![Action::Changed])
    }

    /// Switch units, rescaling every stored length.
    pub fn set_unit(&mut self, unit: Unit) -> Vec<Action> {
        if unit == self.unit {
            return Vec::new();
        }
        self.ledger.convert(self.unit, unit);
        self.unit = unit;
        self.record();
        vec![Action::Changed]
    }

    // --- History ---

    /// Remove the most recently created shape and everything it owns.
    pub fn undo(&mut self) -> Vec<Action> {
        let Some(id) = self.doc.last_created() else {
            info!("nothing to undo");
            return vec![Action::NothingToUndo];
        };
        self.remove_shape(&id);
        debug!(shape = %id, "undo removed shape");
        self.record();
        vec![Action::Changed]
    }

    /// Clear shapes, measurements and history.
    pub fn reset(&mut self) -> Vec<Action> {
        self.doc.clear();
        self.ledger.clear();
        self.history.clear();
        self.ui.selected_id = None;
        self.input = InputState::Idle;
        vec![Action::Changed]
    }

    /// Switch to another space's sketch. The canvas is cleared and, when a
    /// snapshot for that space is given, restored from it.
    pub fn load_space(&mut self, space_id: &str, snapshot: Option<&CanvasSnapshot>) -> Vec<Action> {
        if self.space_id.as_deref() == Some(space_id) {
            return Vec::new();
        }
        self.reset();
        self.space_id = Some(space_id.to_owned());
        if let Some(snapshot) = snapshot {
            self.restore(snapshot);
        }
        info!(space_id, restored = snapshot.is_some(), "space loaded");
        vec![Action::Changed]
    }

    /// Replace the canvas content with a snapshot.
    pub fn restore(&mut self, snapshot: &CanvasSnapshot) {
        self.doc.load_snapshot(snapshot.objects.clone());
        self.ledger.load(snapshot.ledger.clone());
        self.ui.selected_id = None;
        self.input = InputState::Idle;
        self.history.push(snapshot.clone());
    }

    // --- Surface ---

    /// Recompute the canvas size for a new viewport width. Shapes keep their
    /// canvas coordinates.
    #[allow(clippy::float_cmp)]
    pub fn resize(&mut self, viewport_width: f64) -> Vec<Action> {
        let (width, height) = canvas_size_for(viewport_width);
        if width == self.width && height == self.height {
            return Vec::new();
        }
        self.width = width;
        self.height = height;
        vec![Action::RenderNeeded]
    }

    fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    fn remove_shape(&mut self, id: &ShapeId) {
        if self.doc.remove(id).is_some() {
            self.ledger.remove_shape(id);
        }
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
    }

    fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    // --- Queries ---

    /// Current shapes and ledger rows.
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            objects: self.doc.sorted_objects().into_iter().cloned().collect(),
            ledger: self.ledger.entries().to_vec(),
        }
    }

    /// Positioned label glyphs for every measured edge.
    #[must_use]
    pub fn labels(&self) -> Vec<Label> {
        label::layout(&self.doc, &self.ledger)
    }

    /// Measurements with perimeter and the rectangular area approximation.
    #[must_use]
    pub fn report(&self) -> SketchReport {
        SketchReport {
            wall_measurements: self.ledger.measurements(),
            total_perimeter: self.ledger.perimeter(),
            total_area: self.ledger.approximate_area(),
        }
    }

    /// The shape being edited, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
    on_complete: Option<Box<dyn FnMut(&Completion)>>,
}

impl Engine {
    /// Create an engine bound to `canvas`, sized for the current window.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the initial render fails.
    pub fn new(canvas: HtmlCanvasElement, unit: Unit) -> Result<Self, JsValue> {
        let core = EngineCore::with_viewport(window_width(), unit);
        let engine = Self { canvas, core, on_complete: None };
        engine.apply_size();
        engine.render()?;
        Ok(engine)
    }

    /// Register the host callback invoked after every content change.
    pub fn set_on_complete(&mut self, callback: impl FnMut(&Completion) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Render and notify the host as the actions require, then hand the
    /// actions back so the host can react to selection or undo notices.
    ///
    /// # Errors
    ///
    /// Returns `Err` if rendering or raster export fails.
    pub fn process(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, JsValue> {
        let effects = effects_of(&actions);
        if effects.complete {
            let completion = self.completion()?;
            if let Some(callback) = self.on_complete.as_mut() {
                callback(&completion);
            }
        }
        if effects.render {
            self.render()?;
        }
        Ok(actions)
    }

    // --- Delegated edits ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_size(&mut self, px: f64) {
        self.core.set_size(px);
    }

    pub fn set_color(&mut self, color: &str) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.set_color(color);
        self.process(actions)
    }

    pub fn on_pointer_down(&mut self, pt: Point) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_down(pt);
        self.process(actions)
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_move(pt);
        self.process(actions)
    }

    pub fn on_pointer_up(&mut self, pt: Point) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.on_pointer_up(pt);
        self.process(actions)
    }

    pub fn insert_template(&mut self, template: Template) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.insert_template(template);
        self.process(actions)
    }

    pub fn insert_quick_room(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.insert_quick_room();
        self.process(actions)
    }

    pub fn confirm_selection(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.confirm_selection();
        self.process(actions)
    }

    pub fn transform_shape(&mut self, id: ShapeId, transform: Transform) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.transform_shape(id, transform).map_err(to_js)?;
        self.process(actions)
    }

    pub fn set_length(&mut self, label: &str, value: &str) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.set_length(label, value).map_err(to_js)?;
        self.process(actions)
    }

    pub fn set_unit(&mut self, unit: Unit) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.set_unit(unit);
        self.process(actions)
    }

    pub fn undo(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.undo();
        self.process(actions)
    }

    pub fn reset(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.reset();
        self.process(actions)
    }

    pub fn load_space(&mut self, space_id: &str, snapshot: Option<&CanvasSnapshot>) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.load_space(space_id, snapshot);
        self.process(actions)
    }

    // --- Viewport ---

    /// Re-read the window width and resize the canvas element if needed.
    pub fn on_window_resize(&mut self) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.resize(window_width());
        if !actions.is_empty() {
            self.apply_size();
        }
        self.process(actions)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply_size(&self) {
        self.canvas.set_width(self.core.width as u32);
        self.canvas.set_height(self.core.height as u32);
    }

    // --- Render ---

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }

    fn draw(&self, mode: RenderMode) -> Result<(), JsValue> {
        let labels = self.core.labels();
        let scene = Scene {
            doc: &self.core.doc,
            labels: &labels,
            ui: &self.core.ui,
            live_stroke: self.core.live_stroke(),
            width: self.core.width,
            height: self.core.height,
        };
        render::draw(&self.context()?, &scene, mode)
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        self.draw(RenderMode::Screen)
    }

    /// PNG data URL of the sketch without grid or selection chrome.
    ///
    /// # Errors
    ///
    /// Returns `Err` if rendering or encoding fails.
    pub fn export_data_url(&self) -> Result<String, JsValue> {
        self.draw(RenderMode::Export)?;
        let url = self.canvas.to_data_url()?;
        self.render()?;
        Ok(url)
    }

    fn completion(&self) -> Result<Completion, JsValue> {
        Ok(Completion { image_data_url: self.export_data_url()?, report: self.core.report() })
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn report(&self) -> SketchReport {
        self.core.report()
    }

    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        self.core.snapshot()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.core.selection()
    }
}

fn to_js(err: SketchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window_width() -> f64 {
    let Some(window) = web_sys::window() else {
        return CANVAS_WIDTH_PX;
    };
    match window.inner_width() {
        Ok(v) => v.as_f64().unwrap_or(CANVAS_WIDTH_PX),
        Err(_) => CANVAS_WIDTH_PX,
    }
}
