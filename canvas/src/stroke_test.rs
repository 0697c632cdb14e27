use super::*;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn empty_stroke_is_ignored() {
    assert!(normalize(&[]).is_none());
    assert!(eraser_bounds(&[]).is_none());
}

#[test]
fn long_wobbly_stroke_becomes_line_between_endpoints() {
    let raw = pts(&[(10.0, 10.0), (40.0, 14.0), (70.0, 8.0), (110.0, 12.0)]);
    let out = normalize(&raw).unwrap();
    assert_eq!(
        out,
        StrokeOutcome::Straightened(LineShape { a: Point::new(10.0, 10.0), b: Point::new(110.0, 12.0) })
    );
    assert!(out.is_straightened());
}

#[test]
fn short_stroke_is_kept_verbatim() {
    let raw = pts(&[(0.0, 0.0), (5.0, 5.0), (10.0, 2.0)]);
    let out = normalize(&raw).unwrap();
    assert_eq!(out, StrokeOutcome::Freehand(FreehandPath { points: raw.clone() }));
}

#[test]
fn threshold_is_exclusive() {
    // Exactly 20 px apart stays freehand.
    let at = pts(&[(0.0, 0.0), (20.0, 0.0)]);
    assert!(!normalize(&at).unwrap().is_straightened());

    let past = pts(&[(0.0, 0.0), (20.01, 0.0)]);
    assert!(normalize(&past).unwrap().is_straightened());
}

#[test]
fn closed_loop_stays_freehand_even_when_large() {
    // A big loop that returns near its start is not a wall.
    let raw = pts(&[(0.0, 0.0), (200.0, 0.0), (200.0, 200.0), (0.0, 200.0), (3.0, 4.0)]);
    let out = normalize(&raw).unwrap();
    assert!(matches!(out, StrokeOutcome::Freehand(ref p) if p.points == raw));
}

#[test]
fn single_point_stroke_stays_freehand() {
    let raw = pts(&[(7.0, 7.0)]);
    assert!(matches!(normalize(&raw), Some(StrokeOutcome::Freehand(_))));
}

#[test]
fn into_shape_maps_variants() {
    let line = LineShape { a: Point::new(0.0, 0.0), b: Point::new(50.0, 0.0) };
    assert_eq!(StrokeOutcome::Straightened(line).into_shape(), Shape::Line(line));
    let path = FreehandPath { points: pts(&[(1.0, 1.0)]) };
    assert_eq!(StrokeOutcome::Freehand(path.clone()).into_shape(), Shape::Freehand(path));
}

#[test]
fn eraser_bounds_cover_stroke() {
    let b = eraser_bounds(&pts(&[(30.0, 5.0), (10.0, 25.0), (20.0, 15.0)])).unwrap();
    assert_eq!(b, Bounds { min_x: 10.0, min_y: 5.0, max_x: 30.0, max_y: 25.0 });
}
