//! Predefined shapes inserted at the canvas centre.
//!
//! Template sizes are schematic. The preset lengths are placeholder guesses
//! the user overwrites in the ledger; they are not derived from pixel size.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    QUICK_ROOM_DOOR_PX, QUICK_ROOM_HEIGHT_PX, QUICK_ROOM_WIDTH_PX, TEMPLATE_RADIUS_PX, TEMPLATE_RECT_HEIGHT_PX,
    TEMPLATE_RECT_WIDTH_PX,
};
use crate::geom::Point;
use crate::shape::{ArcShape, CircleShape, LineShape, RectShape, Shape};

/// A parametric shape the user can drop onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Open half-circle; one edge.
    Arc,
    /// Full circle; one edge.
    Circle,
    /// Half-circle with its diameter; arc edge then diameter edge.
    HalfCircle,
    /// Rectangle; edges top, right, bottom, left.
    Rectangle,
}

impl Template {
    /// Geometry of the template centred on `center`.
    #[must_use]
    pub fn shape(self, center: Point) -> Shape {
        match self {
            Self::Arc => Shape::Arc(ArcShape { center, radius: TEMPLATE_RADIUS_PX, closed: false }),
            Self::HalfCircle => Shape::Arc(ArcShape { center, radius: TEMPLATE_RADIUS_PX, closed: true }),
            Self::Circle => Shape::Circle(CircleShape { center, radius: TEMPLATE_RADIUS_PX }),
            Self::Rectangle => Shape::Rect(RectShape {
                origin: Point::new(center.x - TEMPLATE_RECT_WIDTH_PX / 2.0, center.y - TEMPLATE_RECT_HEIGHT_PX / 2.0),
                width: TEMPLATE_RECT_WIDTH_PX,
                height: TEMPLATE_RECT_HEIGHT_PX,
            }),
        }
    }

    /// Pre-seeded wall lengths, one per edge.
    #[must_use]
    pub fn presets(self) -> &'static [&'static str] {
        match self {
            Self::Arc => &["157"],
            Self::Circle => &["314"],
            Self::HalfCircle => &["157", "100"],
            Self::Rectangle => &["150", "100", "150", "100"],
        }
    }
}

/// Five wall segments of a rectangular room with a doorway gap in the left
/// wall: top, right, bottom, then the two left-wall pieces either side of
/// the gap.
#[must_use]
pub fn quick_room(center: Point) -> Vec<LineShape> {
    let left = center.x - QUICK_ROOM_WIDTH_PX / 2.0;
    let right = center.x + QUICK_ROOM_WIDTH_PX / 2.0;
    let top = center.y - QUICK_ROOM_HEIGHT_PX / 2.0;
    let bottom = center.y + QUICK_ROOM_HEIGHT_PX / 2.0;
    let door_top = center.y - QUICK_ROOM_DOOR_PX / 2.0;
    let door_bottom = center.y + QUICK_ROOM_DOOR_PX / 2.0;

    let seg = |ax: f64, ay: f64, bx: f64, by: f64| LineShape { a: Point::new(ax, ay), b: Point::new(bx, by) };
    vec![
        seg(left, top, right, top),
        seg(right, top, right, bottom),
        seg(right, bottom, left, bottom),
        seg(left, bottom, left, door_bottom),
        seg(left, door_top, left, top),
    ]
}
