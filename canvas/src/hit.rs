#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Bounds, Point};
use crate::shape::{ShapeId, ShapeStore};

/// Shapes whose bounding box overlaps `eraser`, in creation order.
///
/// Overlap is a plain box test: a shape whose box is only partly covered, or
/// just touched, is still hit.
#[must_use]
pub fn erase_targets(eraser: &Bounds, doc: &ShapeStore) -> Vec<ShapeId> {
    doc.sorted_objects()
        .into_iter()
        .filter(|obj| obj.bounds().is_some_and(|b| b.intersects(eraser)))
        .map(|obj| obj.id)
        .collect()
}

/// Topmost shape whose bounding box (grown by `slop`) contains `pt`.
#[must_use]
pub fn hit_test(pt: Point, doc: &ShapeStore, slop: f64) -> Option<ShapeId> {
    doc.sorted_objects()
        .into_iter()
        .rev()
        .find(|obj| obj.bounds().is_some_and(|b| b.contains(pt, slop)))
        .map(|obj| obj.id)
}
