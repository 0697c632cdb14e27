//! Snapshot history.
//!
//! DESIGN
//! ======
//! A snapshot of every shape and ledger row is appended after each mutating
//! edit. Undo does not replay from this list; it removes the newest shape
//! directly (see `EngineCore::undo`). The list is read back only when the
//! host restores a space's sketch, via [`History::latest`].

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

use crate::error::SketchError;
use crate::ledger::LedgerEntry;
use crate::shape::SketchObject;

/// Serializable state of one canvas. Never contains grid lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub objects: Vec<SketchObject>,
    pub ledger: Vec<LedgerEntry>,
}

impl CanvasSnapshot {
    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Snapshot`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SketchError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Snapshot`] if `json` is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, SketchError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Append-only list of snapshots for one canvas session.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<CanvasSnapshot>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: CanvasSnapshot) {
        self.snapshots.push(snapshot);
    }

    #[must_use]
    pub fn latest(&self) -> Option<&CanvasSnapshot> {
        self.snapshots.last()
    }

    #[must_use]
    pub fn snapshots(&self) -> &[CanvasSnapshot] {
        &self.snapshots
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
