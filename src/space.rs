//! Spaces: the rooms a lead wants designed, each with its own sketch.

use std::fmt;

use canvas::engine::Completion;
use canvas::history::CanvasSnapshot;
use canvas::ledger::{WallMeasurement, approximate_area_of, perimeter_of};
use canvas::units::{Unit, convert_length};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SpaceId = Uuid;

/// Standard 8 ft ceiling.
pub const DEFAULT_CEILING_IN: &str = "96";
pub const DEFAULT_CEILING_CM: &str = "243.84";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceKind {
    Closet,
    Kitchen,
    Garage,
    #[default]
    Other,
}

impl fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closet => "Closet",
            Self::Kitchen => "Kitchen",
            Self::Garage => "Garage",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A file the user attached to a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { id: Uuid::new_v4(), file_name: file_name.into(), content_type: content_type.into(), bytes }
    }

    /// Storage key segment: the id plus a filesystem-safe copy of the name.
    #[must_use]
    pub fn storage_name(&self) -> String {
        let safe: String = self
            .file_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        format!("{}-{safe}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    pub kind: SpaceKind,
    /// Free text in the form's current unit.
    pub ceiling_height: String,
    /// Latest canvas completion: raster plus measurements.
    pub sketch: Option<Completion>,
    /// Canvas content, restored when the user switches back to this space.
    pub sketch_snapshot: Option<CanvasSnapshot>,
    pub attachments: Vec<Attachment>,
}

impl Space {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: SpaceKind, unit: Unit) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            ceiling_height: default_ceiling_height(unit).to_owned(),
            sketch: None,
            sketch_snapshot: None,
            attachments: Vec::new(),
        }
    }

    /// Rescale the ceiling height and every sketch measurement.
    ///
    /// Non-numeric text is left untouched. Totals are recomputed from the
    /// converted lengths so they agree with what is stored. The canvas
    /// snapshot is rescaled too so a restored canvas shows the converted
    /// lengths.
    pub fn convert_units(&mut self, from: Unit, to: Unit) {
        if from == to {
            return;
        }
        if let Some(converted) = convert_length(&self.ceiling_height, from, to) {
            self.ceiling_height = converted;
        }
        if let Some(sketch) = self.sketch.as_mut() {
            for m in &mut sketch.report.wall_measurements {
                if let Some(converted) = convert_length(&m.length, from, to) {
                    m.length = converted;
                }
            }
            let report = &mut sketch.report;
            let lengths: Vec<&str> = report.wall_measurements.iter().map(|m| m.length.as_str()).collect();
            let (perimeter, area) = (perimeter_of(lengths.iter().copied()), approximate_area_of(lengths));
            report.total_perimeter = perimeter;
            report.total_area = area;
        }
        if let Some(snapshot) = self.sketch_snapshot.as_mut() {
            for entry in &mut snapshot.ledger {
                if let Some(converted) = convert_length(&entry.length, from, to) {
                    entry.length = converted;
                }
            }
        }
    }

    /// The persisted form of this space.
    #[must_use]
    pub fn record(&self, unit: Unit, file_urls: Vec<String>) -> SpaceRecord {
        let (drawing_data, wall_measurements, total_perimeter, total_area) = match &self.sketch {
            Some(s) => (
                Some(s.image_data_url.clone()),
                s.report.wall_measurements.clone(),
                s.report.total_perimeter,
                s.report.total_area,
            ),
            None => (None, Vec::new(), 0.0, 0.0),
        };
        SpaceRecord {
            name: self.name.clone(),
            kind: self.kind,
            ceiling_height: self.ceiling_height.clone(),
            drawing_data,
            wall_measurements,
            unit,
            total_perimeter,
            total_area,
            file_urls,
        }
    }
}

#[must_use]
pub fn default_ceiling_height(unit: Unit) -> &'static str {
    match unit {
        Unit::Cm => DEFAULT_CEILING_CM,
        Unit::In => DEFAULT_CEILING_IN,
    }
}

/// A space as stored with a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpaceKind,
    pub ceiling_height: String,
    /// PNG data URL of the sketch.
    pub drawing_data: Option<String>,
    pub wall_measurements: Vec<WallMeasurement>,
    pub unit: Unit,
    pub total_perimeter: f64,
    pub total_area: f64,
    pub file_urls: Vec<String>,
}

#[cfg(test)]
#[path = "space_test.rs"]
mod tests;
