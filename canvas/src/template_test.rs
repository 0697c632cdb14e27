#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Bounds;

const CENTER: Point = Point { x: 400.0, y: 300.0 };

#[test]
fn presets_match_edge_counts() {
    for t in [Template::Arc, Template::Circle, Template::HalfCircle, Template::Rectangle] {
        assert_eq!(t.presets().len(), t.shape(CENTER).edge_count(), "{t:?}");
    }
}

#[test]
fn preset_lengths() {
    assert_eq!(Template::Arc.presets(), ["157"]);
    assert_eq!(Template::Circle.presets(), ["314"]);
    assert_eq!(Template::HalfCircle.presets(), ["157", "100"]);
    assert_eq!(Template::Rectangle.presets(), ["150", "100", "150", "100"]);
}

#[test]
fn rectangle_is_centered() {
    let Shape::Rect(r) = Template::Rectangle.shape(CENTER) else {
        panic!("expected rect");
    };
    assert_eq!(r.origin, Point::new(325.0, 250.0));
    assert_eq!((r.width, r.height), (150.0, 100.0));
}

#[test]
fn arc_and_half_circle_differ_only_in_closure() {
    let Shape::Arc(open) = Template::Arc.shape(CENTER) else {
        panic!("expected arc");
    };
    let Shape::Arc(closed) = Template::HalfCircle.shape(CENTER) else {
        panic!("expected arc");
    };
    assert!(!open.closed);
    assert!(closed.closed);
    assert_eq!(open.center, closed.center);
    assert_eq!(open.radius, closed.radius);
}

#[test]
fn circle_uses_template_radius() {
    assert_eq!(
        Template::Circle.shape(CENTER),
        Shape::Circle(CircleShape { center: CENTER, radius: TEMPLATE_RADIUS_PX })
    );
}

#[test]
fn template_serde_names() {
    assert_eq!(serde_json::to_string(&Template::HalfCircle).unwrap(), "\"half_circle\"");
    let t: Template = serde_json::from_str("\"rectangle\"").unwrap();
    assert_eq!(t, Template::Rectangle);
}

#[test]
fn quick_room_has_five_segments_with_doorway_gap() {
    let walls = quick_room(CENTER);
    assert_eq!(walls.len(), 5);

    let all: Vec<Point> = walls.iter().flat_map(|w| [w.a, w.b]).collect();
    let b = Bounds::from_points(&all).unwrap();
    assert_eq!(b.width(), QUICK_ROOM_WIDTH_PX);
    assert_eq!(b.height(), QUICK_ROOM_HEIGHT_PX);

    // Both left pieces are vertical on the left edge and leave a gap.
    let lower = walls[3];
    let upper = walls[4];
    assert_eq!(lower.a.x, b.min_x);
    assert_eq!(upper.a.x, b.min_x);
    let gap = lower.b.y - upper.a.y;
    assert_eq!(gap, QUICK_ROOM_DOOR_PX);
}
