//! Measurement ledger: the ordered list of wall lengths behind the labels.
//!
//! DESIGN
//! ======
//! Entries are keyed by a stable `(shape, edge)` pair. The display letter is
//! never stored; it is derived from the entry's position in the ledger. That
//! keeps labels contiguous after any removal, whether it came from the
//! eraser or from undo.
//!
//! Lengths are free text so the host can show exactly what the user typed.
//! Aggregates parse on demand and treat anything non-numeric as zero.

#[cfg(test)]
#[path = "ledger_test.rs"]
mod ledger_test;

use serde::{Deserialize, Serialize};

use crate::error::SketchError;
use crate::shape::ShapeId;
use crate::units::{Unit, convert_length, parse_length};

/// Identifies one measurable edge of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub shape: ShapeId,
    pub edge: usize,
}

/// A ledger row as stored internally and in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub key: EdgeKey,
    pub length: String,
}

/// A `(label, length)` pair as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallMeasurement {
    pub label: String,
    pub length: String,
}

/// Sum of every parseable length; anything else counts as zero.
#[must_use]
pub fn perimeter_of<'a>(lengths: impl IntoIterator<Item = &'a str>) -> f64 {
    lengths.into_iter().map(parse_length).sum()
}

/// Shortest positive length times longest, or zero with fewer than four lengths.
#[must_use]
pub fn approximate_area_of<'a>(lengths: impl IntoIterator<Item = &'a str>) -> f64 {
    let values: Vec<f64> = lengths.into_iter().map(parse_length).collect();
    if values.len() < 4 {
        return 0.0;
    }
    let (min, max) = values
        .iter()
        .filter(|v| **v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min.is_finite() && max.is_finite() { min * max } else { 0.0 }
}

/// Display label for the entry at `index`: A..Z, then AA, AB, ...
#[must_use]
pub fn label_for_index(index: usize) -> String {
    let mut n = index;
    let mut out = Vec::new();
    loop {
        // `n % 26` always fits in a u8.
        #[allow(clippy::cast_possible_truncation)]
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.iter().rev().map(|&b| char::from(b)).collect()
}

/// Ordered wall measurements for one canvas.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry per preset for `shape`, edges numbered from zero.
    pub fn push_shape<S: AsRef<str>>(&mut self, shape: ShapeId, presets: &[S]) {
        for (edge, length) in presets.iter().enumerate() {
            self.entries
                .push(LedgerEntry { key: EdgeKey { shape, edge }, length: length.as_ref().to_owned() });
        }
    }

    /// Drop every entry owned by `shape`. Returns how many were removed.
    pub fn remove_shape(&mut self, shape: &ShapeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.key.shape != *shape);
        before - self.entries.len()
    }

    /// Current display label of an edge, if it is in the ledger.
    #[must_use]
    pub fn label_of(&self, key: &EdgeKey) -> Option<String> {
        self.entries
            .iter()
            .position(|e| e.key == *key)
            .map(label_for_index)
    }

    /// Entry currently shown under `label`.
    #[must_use]
    pub fn entry_by_label(&self, label: &str) -> Option<&LedgerEntry> {
        self.index_of_label(label).and_then(|i| self.entries.get(i))
    }

    fn index_of_label(&self, label: &str) -> Option<usize> {
        (0..self.entries.len()).find(|&i| label_for_index(i) == label)
    }

    /// Store the user's text for `label` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::UnknownLabel`] if no entry carries `label`.
    pub fn set_length(&mut self, label: &str, value: &str) -> Result<(), SketchError> {
        let idx = self
            .index_of_label(label)
            .ok_or_else(|| SketchError::UnknownLabel(label.to_owned()))?;
        value.clone_into(&mut self.entries[idx].length);
        Ok(())
    }

    /// Labelled measurements in ledger order.
    #[must_use]
    pub fn measurements(&self) -> Vec<WallMeasurement> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| WallMeasurement { label: label_for_index(i), length: e.length.clone() })
            .collect()
    }

    /// Sum of every parseable length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        perimeter_of(self.entries.iter().map(|e| e.length.as_str()))
    }

    /// Rectangular-room approximation of floor area.
    ///
    /// With fewer than four measurements the result is zero. Otherwise it is
    /// the product of the shortest and longest positive lengths. This is not
    /// a polygon area and only holds for rectangular rooms.
    #[must_use]
    pub fn approximate_area(&self) -> f64 {
        approximate_area_of(self.entries.iter().map(|e| e.length.as_str()))
    }

    /// Rescale every numeric length from one unit to another.
    pub fn convert(&mut self, from: Unit, to: Unit) {
        if from == to {
            return;
        }
        for entry in &mut self.entries {
            if let Some(converted) = convert_length(&entry.length, from, to) {
                entry.length = converted;
            }
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Replace all entries, e.g. when restoring a snapshot.
    pub fn load(&mut self, entries: Vec<LedgerEntry>) {
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
