#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Shape {
    Shape::Line(LineShape { a: Point::new(ax, ay), b: Point::new(bx, by) })
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::Rect(RectShape { origin: Point::new(x, y), width: w, height: h })
}

// =============================================================
// Shape
// =============================================================

#[test]
fn edge_counts_per_variant() {
    assert_eq!(line(0.0, 0.0, 1.0, 1.0).edge_count(), 1);
    assert_eq!(Shape::Circle(CircleShape { center: Point::default(), radius: 5.0 }).edge_count(), 1);
    assert_eq!(Shape::Arc(ArcShape { center: Point::default(), radius: 5.0, closed: false }).edge_count(), 1);
    assert_eq!(Shape::Arc(ArcShape { center: Point::default(), radius: 5.0, closed: true }).edge_count(), 2);
    assert_eq!(rect(0.0, 0.0, 10.0, 10.0).edge_count(), 4);
    assert_eq!(Shape::Freehand(FreehandPath { points: vec![] }).edge_count(), 1);
}

#[test]
fn circle_outline_bounds_match_radius() {
    let c = Shape::Circle(CircleShape { center: Point::new(100.0, 100.0), radius: 50.0 });
    let b = Bounds::from_points(&c.outline()).unwrap();
    assert!(approx_eq(b.min_x, 50.0));
    assert!(approx_eq(b.max_x, 150.0));
    assert!(approx_eq(b.min_y, 50.0));
    assert!(approx_eq(b.max_y, 150.0));
}

#[test]
fn arc_outline_is_upper_half() {
    let a = Shape::Arc(ArcShape { center: Point::new(100.0, 100.0), radius: 50.0, closed: false });
    let b = Bounds::from_points(&a.outline()).unwrap();
    assert!(approx_eq(b.min_y, 50.0));
    assert!(approx_eq(b.max_y, 100.0));
    assert!(approx_eq(b.width(), 100.0));
}

#[test]
fn rect_pivot_is_center() {
    assert_eq!(rect(10.0, 20.0, 100.0, 50.0).pivot(), Point::new(60.0, 45.0));
}

#[test]
fn shape_serde_is_tagged() {
    let json = serde_json::to_value(line(0.0, 0.0, 10.0, 0.0)).unwrap();
    assert_eq!(json["kind"], "line");
    let back: Shape = serde_json::from_value(json).unwrap();
    assert_eq!(back, line(0.0, 0.0, 10.0, 0.0));
}

// =============================================================
// Transform
// =============================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::default();
    assert!(t.is_identity());
    assert_eq!(t.apply(Point::new(3.0, 4.0), Point::new(1.0, 1.0)), Point::new(3.0, 4.0));
}

#[test]
fn transform_translates() {
    let t = Transform { dx: 10.0, dy: -5.0, ..Default::default() };
    assert_eq!(t.apply(Point::new(0.0, 0.0), Point::default()), Point::new(10.0, -5.0));
}

#[test]
fn transform_scales_about_pivot() {
    let t = Transform { scale_x: 2.0, scale_y: 3.0, ..Default::default() };
    let p = t.apply(Point::new(15.0, 15.0), Point::new(10.0, 10.0));
    assert_eq!(p, Point::new(20.0, 25.0));
}

#[test]
fn transform_rotates_clockwise_in_canvas_space() {
    let t = Transform { rotation: 90.0, ..Default::default() };
    let p = t.apply(Point::new(10.0, 0.0), Point::default());
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 10.0));
}

// =============================================================
// SketchObject
// =============================================================

#[test]
fn bounds_follow_transform() {
    let mut store = ShapeStore::new();
    let id = store.insert(rect(0.0, 0.0, 100.0, 50.0), Style::default());
    store.set_transform(&id, Transform { dx: 20.0, dy: 30.0, ..Default::default() });
    let b = store.get(&id).unwrap().bounds().unwrap();
    assert_eq!(b, Bounds { min_x: 20.0, min_y: 30.0, max_x: 120.0, max_y: 80.0 });
}

#[test]
fn rotated_rect_bounds_swap_extent() {
    let mut store = ShapeStore::new();
    let id = store.insert(rect(0.0, 0.0, 100.0, 50.0), Style::default());
    store.set_transform(&id, Transform { rotation: 90.0, ..Default::default() });
    let b = store.get(&id).unwrap().bounds().unwrap();
    assert!(approx_eq(b.width(), 50.0));
    assert!(approx_eq(b.height(), 100.0));
    assert!(approx_eq(b.center().x, 50.0));
    assert!(approx_eq(b.center().y, 25.0));
}

#[test]
fn empty_freehand_has_no_bounds() {
    let mut store = ShapeStore::new();
    let id = store.insert(Shape::Freehand(FreehandPath { points: vec![] }), Style::default());
    assert!(store.get(&id).unwrap().bounds().is_none());
}

// =============================================================
// ShapeStore
// =============================================================

#[test]
fn store_starts_empty() {
    let store = ShapeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.last_created().is_none());
}

#[test]
fn insert_assigns_increasing_seq() {
    let mut store = ShapeStore::new();
    let a = store.insert(line(0.0, 0.0, 1.0, 0.0), Style::default());
    let b = store.insert(line(0.0, 0.0, 2.0, 0.0), Style::default());
    assert!(store.get(&a).unwrap().seq < store.get(&b).unwrap().seq);
    assert_eq!(store.last_created(), Some(b));
}

#[test]
fn sorted_objects_follow_creation_order() {
    let mut store = ShapeStore::new();
    let ids: Vec<ShapeId> = (0..5)
        .map(|i| store.insert(line(0.0, 0.0, f64::from(i), 0.0), Style::default()))
        .collect();
    let sorted: Vec<ShapeId> = store.sorted_objects().iter().map(|o| o.id).collect();
    assert_eq!(sorted, ids);
}

#[test]
fn remove_returns_object() {
    let mut store = ShapeStore::new();
    let id = store.insert(line(0.0, 0.0, 1.0, 0.0), Style::default());
    let removed = store.remove(&id).unwrap();
    assert_eq!(removed.id, id);
    assert!(store.is_empty());
    assert!(store.remove(&id).is_none());
}

#[test]
fn set_transform_on_missing_shape_returns_false() {
    let mut store = ShapeStore::new();
    assert!(!store.set_transform(&Uuid::new_v4(), Transform::default()));
}

#[test]
fn recolor_all_updates_every_shape() {
    let mut store = ShapeStore::new();
    store.insert(line(0.0, 0.0, 1.0, 0.0), Style::default());
    store.insert(rect(0.0, 0.0, 1.0, 1.0), Style { stroke: "#ff0000".into(), ..Default::default() });
    store.recolor_all("#00ff00");
    assert!(store.sorted_objects().iter().all(|o| o.style.stroke == "#00ff00"));
}

#[test]
fn load_snapshot_continues_sequence() {
    let mut store = ShapeStore::new();
    store.insert(line(0.0, 0.0, 1.0, 0.0), Style::default());
    store.insert(line(0.0, 0.0, 2.0, 0.0), Style::default());
    let saved: Vec<SketchObject> = store.sorted_objects().into_iter().cloned().collect();

    let mut restored = ShapeStore::new();
    restored.load_snapshot(saved);
    let fresh = restored.insert(line(0.0, 0.0, 3.0, 0.0), Style::default());
    assert_eq!(restored.get(&fresh).unwrap().seq, 2);
    assert_eq!(restored.last_created(), Some(fresh));
}

#[test]
fn clear_resets_sequence() {
    let mut store = ShapeStore::new();
    store.insert(line(0.0, 0.0, 1.0, 0.0), Style::default());
    store.clear();
    let id = store.insert(line(0.0, 0.0, 1.0, 0.0), Style::default());
    assert_eq!(store.get(&id).unwrap().seq, 0);
}
