//! Shared numeric constants for the canvas crate.

// ── Surface ─────────────────────────────────────────────────────

/// Canvas width in CSS pixels on desktop viewports.
pub const CANVAS_WIDTH_PX: f64 = 800.0;

/// Canvas height in CSS pixels on desktop viewports.
pub const CANVAS_HEIGHT_PX: f64 = 600.0;

/// Canvas width in CSS pixels below the mobile breakpoint.
pub const MOBILE_CANVAS_WIDTH_PX: f64 = 350.0;

/// Canvas height in CSS pixels below the mobile breakpoint.
pub const MOBILE_CANVAS_HEIGHT_PX: f64 = 300.0;

/// Viewports narrower than this use the mobile canvas size.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Background grid cell size in pixels.
pub const GRID_CELL_PX: f64 = 20.0;

// ── Brush ───────────────────────────────────────────────────────

/// Initial brush colour.
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

/// Initial brush width in pixels.
pub const DEFAULT_BRUSH_SIZE_PX: f64 = 2.0;

/// Strokes whose start-to-end distance exceeds this become straight walls.
pub const STRAIGHTEN_MIN_PX: f64 = 20.0;

// ── Labels ──────────────────────────────────────────────────────

/// Gap between an edge and its label glyph for multi-edge templates.
pub const LABEL_OFFSET_PX: f64 = 15.0;

/// Label glyph font size in pixels.
pub const LABEL_FONT_PX: f64 = 16.0;

// ── Templates ───────────────────────────────────────────────────

/// Radius used by the arc, circle and half-circle templates.
pub const TEMPLATE_RADIUS_PX: f64 = 50.0;

/// Width of the rectangle template.
pub const TEMPLATE_RECT_WIDTH_PX: f64 = 150.0;

/// Height of the rectangle template.
pub const TEMPLATE_RECT_HEIGHT_PX: f64 = 100.0;

/// Quick room outer width.
pub const QUICK_ROOM_WIDTH_PX: f64 = 300.0;

/// Quick room outer height.
pub const QUICK_ROOM_HEIGHT_PX: f64 = 200.0;

/// Width of the doorway gap left in the quick room's left wall.
pub const QUICK_ROOM_DOOR_PX: f64 = 60.0;

/// Number of segments used to approximate circular outlines for bounds.
pub const CURVE_SAMPLES: usize = 32;

// ── Units ───────────────────────────────────────────────────────

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

// ── Hit-testing ─────────────────────────────────────────────────

/// Pointer slop in pixels when grabbing a selected shape.
pub const HIT_SLOP_PX: f64 = 6.0;
