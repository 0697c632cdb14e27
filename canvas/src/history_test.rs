use uuid::Uuid;

use super::*;
use crate::geom::Point;
use crate::ledger::EdgeKey;
use crate::shape::{LineShape, Shape, Style, Transform};

fn snapshot_with_line() -> CanvasSnapshot {
    let id = Uuid::new_v4();
    CanvasSnapshot {
        objects: vec![SketchObject {
            id,
            seq: 0,
            shape: Shape::Line(LineShape { a: Point::new(0.0, 0.0), b: Point::new(100.0, 0.0) }),
            style: Style { shadow: true, ..Default::default() },
            transform: Transform { dx: 5.0, ..Default::default() },
        }],
        ledger: vec![LedgerEntry { key: EdgeKey { shape: id, edge: 0 }, length: "240".into() }],
    }
}

#[test]
fn new_history_is_empty() {
    let history = History::new();
    assert!(history.is_empty());
    assert!(history.latest().is_none());
}

#[test]
fn push_appends_and_latest_returns_last() {
    let mut history = History::new();
    history.push(CanvasSnapshot::default());
    let snap = snapshot_with_line();
    history.push(snap.clone());
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest(), Some(&snap));
    assert!(history.snapshots()[0].is_empty());
}

#[test]
fn clear_drops_everything() {
    let mut history = History::new();
    history.push(snapshot_with_line());
    history.clear();
    assert!(history.is_empty());
}

#[test]
fn snapshot_json_preserves_state() {
    let snap = snapshot_with_line();
    let json = snap.to_json().unwrap();
    assert!(json.contains("\"kind\":\"line\""));
    let back = CanvasSnapshot::from_json(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn snapshot_missing_transform_defaults_to_identity() {
    let id = Uuid::new_v4();
    let json = format!(
        r##"{{"objects":[{{"id":"{id}","seq":3,"shape":{{"kind":"circle","center":{{"x":1.0,"y":2.0}},"radius":5.0}},"style":{{"stroke":"#000","stroke_width":2.0,"shadow":false}}}}],"ledger":[]}}"##
    );
    let snap = CanvasSnapshot::from_json(&json).unwrap();
    assert!(snap.objects[0].transform.is_identity());
}

#[test]
fn malformed_snapshot_is_an_error() {
    let err = CanvasSnapshot::from_json("{\"objects\": 5}").unwrap_err();
    assert!(matches!(err, SketchError::Snapshot(_)));
}
