//! Shape model: the drawable variants, their style and transform, and the
//! in-memory store that owns every live shape on the canvas.
//!
//! Each shape is an explicit tagged variant carrying its own geometry in
//! local canvas coordinates. Moving, scaling and rotating never rewrite that
//! geometry; they update the shape's [`Transform`], and every consumer
//! (hit-testing, label placement, rendering) reads the transformed outline.
//!
//! Grid lines are not shapes. The renderer draws them directly, so nothing
//! in this module can erase, undo or export them.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{CURVE_SAMPLES, DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_SIZE_PX};
use crate::geom::{Bounds, Point};

/// Stable identifier for a shape. Never reused within a session.
pub type ShapeId = Uuid;

/// Straight wall segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub a: Point,
    pub b: Point,
}

/// Full circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f64,
}

/// Upper half of a circle. A closed arc also draws its diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub center: Point,
    pub radius: f64,
    pub closed: bool,
}

/// Axis-aligned rectangle before transform; `origin` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

/// Stroke kept exactly as sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandPath {
    pub points: Vec<Point>,
}

/// Geometry of a drawable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Line(LineShape),
    Circle(CircleShape),
    Arc(ArcShape),
    Rect(RectShape),
    Freehand(FreehandPath),
}

impl Shape {
    /// Number of measurable edges, one label and ledger entry each.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        match self {
            Self::Line(_) | Self::Circle(_) | Self::Freehand(_) => 1,
            Self::Arc(arc) => {
                if arc.closed {
                    2
                } else {
                    1
                }
            }
            Self::Rect(_) => 4,
        }
    }

    /// Outline sampled in local coordinates, before any transform.
    #[must_use]
    pub fn outline(&self) -> Vec<Point> {
        match self {
            Self::Line(line) => vec![line.a, line.b],
            Self::Circle(c) => sample_arc(c.center, c.radius, 0.0, 2.0 * PI, CURVE_SAMPLES),
            // Upper half in canvas space (y down) runs from PI to 2*PI. The
            // chord of a closed arc joins the two endpoints already sampled.
            Self::Arc(arc) => sample_arc(arc.center, arc.radius, PI, 2.0 * PI, CURVE_SAMPLES / 2),
            Self::Rect(r) => vec![
                r.origin,
                Point::new(r.origin.x + r.width, r.origin.y),
                Point::new(r.origin.x + r.width, r.origin.y + r.height),
                Point::new(r.origin.x, r.origin.y + r.height),
            ],
            Self::Freehand(path) => path.points.clone(),
        }
    }

    /// Centre of the untransformed outline; the pivot for scale and rotation.
    #[must_use]
    pub fn pivot(&self) -> Point {
        Bounds::from_points(&self.outline()).map_or_else(Point::default, |b| b.center())
    }
}

fn sample_arc(center: Point, radius: f64, start: f64, end: f64, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = start + (end - start) * (i as f64 / segments as f64);
            Point::new(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

/// Move / scale / rotate applied on top of a shape's local geometry.
///
/// Scale and rotation happen around the shape's pivot, then the translation
/// is added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub dx: f64,
    pub dy: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { dx: 0.0, dy: 0.0, scale_x: 1.0, scale_y: 1.0, rotation: 0.0 }
    }
}

impl Transform {
    /// Map a local point into canvas space.
    #[must_use]
    pub fn apply(&self, p: Point, pivot: Point) -> Point {
        let sx = (p.x - pivot.x) * self.scale_x;
        let sy = (p.y - pivot.y) * self.scale_y;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Point::new(
            pivot.x + sx * cos - sy * sin + self.dx,
            pivot.y + sx * sin + sy * cos + self.dy,
        )
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Stroke appearance of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// CSS colour string.
    pub stroke: String,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Draw a soft drop shadow under the stroke.
    pub shadow: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self { stroke: DEFAULT_BRUSH_COLOR.to_owned(), stroke_width: DEFAULT_BRUSH_SIZE_PX, shadow: false }
    }
}

/// A shape as it lives on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchObject {
    pub id: ShapeId,
    /// Creation order within the session; later shapes draw on top.
    pub seq: u64,
    pub shape: Shape,
    pub style: Style,
    #[serde(default)]
    pub transform: Transform,
}

impl SketchObject {
    /// Outline in canvas space with the transform applied.
    #[must_use]
    pub fn world_outline(&self) -> Vec<Point> {
        let outline = self.shape.outline();
        if self.transform.is_identity() {
            return outline;
        }
        let pivot = self.shape.pivot();
        outline
            .into_iter()
            .map(|p| self.transform.apply(p, pivot))
            .collect()
    }

    /// Live axis-aligned bounding box. `None` only for an empty freehand path.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.world_outline())
    }
}

/// In-memory store of the shapes on one canvas.
pub struct ShapeStore {
    objects: HashMap<ShapeId, SketchObject>,
    next_seq: u64,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new(), next_seq: 0 }
    }

    /// Add a shape and return its freshly generated id.
    pub fn insert(&mut self, shape: Shape, style: Style) -> ShapeId {
        let id = Uuid::new_v4();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.objects
            .insert(id, SketchObject { id, seq, shape, style, transform: Transform::default() });
        id
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<SketchObject> {
        self.objects.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&SketchObject> {
        self.objects.get(id)
    }

    /// Replace a shape's transform. Returns false if the shape doesn't exist.
    pub fn set_transform(&mut self, id: &ShapeId, transform: Transform) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        obj.transform = transform;
        true
    }

    /// Apply one stroke colour to every shape.
    pub fn recolor_all(&mut self, color: &str) {
        for obj in self.objects.values_mut() {
            color.clone_into(&mut obj.style.stroke);
        }
    }

    /// The most recently created shape still on the canvas.
    #[must_use]
    pub fn last_created(&self) -> Option<ShapeId> {
        self.objects.values().max_by_key(|o| o.seq).map(|o| o.id)
    }

    /// Replace all shapes with a snapshot. New shapes continue after the
    /// highest restored sequence number.
    pub fn load_snapshot(&mut self, objects: Vec<SketchObject>) {
        self.objects.clear();
        self.next_seq = objects.iter().map(|o| o.seq + 1).max().unwrap_or(0);
        for obj in objects {
            self.objects.insert(obj.id, obj);
        }
    }

    /// Remove every shape and restart sequence numbering.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.next_seq = 0;
    }

    /// All shapes in creation order (bottom of the draw stack first).
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&SketchObject> {
        let mut objs: Vec<&SketchObject> = self.objects.values().collect();
        objs.sort_by_key(|o| o.seq);
        objs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}
