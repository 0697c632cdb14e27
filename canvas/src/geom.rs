#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas pixel space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned bounding box in canvas pixels.
///
/// Degenerate boxes (zero width or height) are valid: a horizontal line has
/// a zero-height box and still participates in overlap tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box containing every point. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = Self { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        for p in rest {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    #[must_use]
    pub fn top_center(&self) -> Point {
        Point::new(self.center().x, self.min_y)
    }

    #[must_use]
    pub fn bottom_center(&self) -> Point {
        Point::new(self.center().x, self.max_y)
    }

    #[must_use]
    pub fn left_center(&self) -> Point {
        Point::new(self.min_x, self.center().y)
    }

    #[must_use]
    pub fn right_center(&self) -> Point {
        Point::new(self.max_x, self.center().y)
    }

    /// Whether the two boxes overlap. Touching edges count as overlap.
    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    /// Whether `pt` lies inside the box grown by `slop` on every side.
    #[must_use]
    pub fn contains(&self, pt: Point, slop: f64) -> bool {
        pt.x >= self.min_x - slop && pt.x <= self.max_x + slop && pt.y >= self.min_y - slop && pt.y <= self.max_y + slop
    }
}
