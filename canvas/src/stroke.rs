//! Stroke normalization: what a finished freehand stroke turns into.
//!
//! A draw stroke is classified once, on release. If its endpoints are far
//! enough apart it is replaced by an ideal straight wall between them;
//! otherwise the sampled path is kept exactly as drawn. No curve fitting or
//! multi-segment decomposition is attempted.
//!
//! An erase stroke is never rendered. Only its bounding box matters.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use crate::consts::STRAIGHTEN_MIN_PX;
use crate::geom::{Bounds, Point};
use crate::shape::{FreehandPath, LineShape, Shape};

/// Result of classifying a completed draw stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeOutcome {
    /// Endpoints more than [`STRAIGHTEN_MIN_PX`] apart; replaced by a line.
    Straightened(LineShape),
    /// Short or closed stroke; kept as sampled.
    Freehand(FreehandPath),
}

impl StrokeOutcome {
    #[must_use]
    pub fn into_shape(self) -> Shape {
        match self {
            Self::Straightened(line) => Shape::Line(line),
            Self::Freehand(path) => Shape::Freehand(path),
        }
    }

    #[must_use]
    pub fn is_straightened(&self) -> bool {
        matches!(self, Self::Straightened(_))
    }
}

/// Classify a completed draw stroke. `None` when no points were sampled.
#[must_use]
pub fn normalize(points: &[Point]) -> Option<StrokeOutcome> {
    let (&start, &end) = (points.first()?, points.last()?);
    if start.distance(end) > STRAIGHTEN_MIN_PX {
        Some(StrokeOutcome::Straightened(LineShape { a: start, b: end }))
    } else {
        Some(StrokeOutcome::Freehand(FreehandPath { points: points.to_vec() }))
    }
}

/// Hit region of an eraser stroke. `None` when no points were sampled.
#[must_use]
pub fn eraser_bounds(points: &[Point]) -> Option<Bounds> {
    Bounds::from_points(points)
}
