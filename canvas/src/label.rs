//! Label placement for wall edges.
//!
//! A label is the glyph drawn next to each measured edge. Its text comes from
//! the ledger and its position from the owning shape's live bounding box, so
//! a label is recomputed rather than stored: after any move, scale or rotate
//! the next layout call already reflects the new box.

#[cfg(test)]
#[path = "label_test.rs"]
mod label_test;

use crate::consts::LABEL_OFFSET_PX;
use crate::geom::{Bounds, Point};
use crate::ledger::{EdgeKey, Ledger, label_for_index};
use crate::shape::{Shape, ShapeStore, SketchObject};

/// A positioned label glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub key: EdgeKey,
    pub position: Point,
}

/// Anchor for each edge of `obj`, indexed by edge number.
///
/// Single-edge shapes sit at the box centre. Multi-edge templates place
/// labels outside the box next to the edge they name.
#[must_use]
pub fn edge_anchors(obj: &SketchObject) -> Vec<Point> {
    let Some(b) = obj.bounds() else {
        return Vec::new();
    };
    match &obj.shape {
        Shape::Rect(_) => rect_anchors(&b),
        Shape::Arc(arc) if arc.closed => vec![
            offset(b.top_center(), 0.0, -LABEL_OFFSET_PX),
            offset(b.bottom_center(), 0.0, LABEL_OFFSET_PX),
        ],
        Shape::Line(_) | Shape::Circle(_) | Shape::Arc(_) | Shape::Freehand(_) => vec![b.center()],
    }
}

fn rect_anchors(b: &Bounds) -> Vec<Point> {
    vec![
        offset(b.top_center(), 0.0, -LABEL_OFFSET_PX),
        offset(b.right_center(), LABEL_OFFSET_PX, 0.0),
        offset(b.bottom_center(), 0.0, LABEL_OFFSET_PX),
        offset(b.left_center(), -LABEL_OFFSET_PX, 0.0),
    ]
}

fn offset(p: Point, dx: f64, dy: f64) -> Point {
    Point::new(p.x + dx, p.y + dy)
}

/// Lay out every label in ledger order.
///
/// Ledger entries whose shape has vanished or has no bounds are skipped.
#[must_use]
pub fn layout(doc: &ShapeStore, ledger: &Ledger) -> Vec<Label> {
    ledger
        .entries()
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let obj = doc.get(&entry.key.shape)?;
            let position = edge_anchors(obj).get(entry.key.edge).copied()?;
            Some(Label { text: label_for_index(i), key: entry.key, position })
        })
        .collect()
}
