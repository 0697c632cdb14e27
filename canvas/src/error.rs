//! Error type for fallible canvas operations.

use crate::shape::ShapeId;

/// Errors produced by sketch edits and snapshot handling.
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// No ledger entry currently carries this label.
    #[error("unknown wall label: {0}")]
    UnknownLabel(String),

    /// The shape is not on the canvas (erased, undone, or never created).
    #[error("unknown shape: {0}")]
    UnknownShape(ShapeId),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
