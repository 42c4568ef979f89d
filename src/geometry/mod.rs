//! Geometry primitives for region bounds.
//!
//! Everything here works in source coordinate units (floating point) and
//! is free of I/O, so it can be reused by every stage of the pipeline.

mod arc;
mod curve;
mod path;

use serde::{Deserialize, Serialize};

pub use arc::{arc_bounds, ArcParams};
pub use curve::{cubic_extrema, quadratic_extrema};
pub use path::{parse_path, path_bounds, PathSegment};

/// An axis-aligned rectangle in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RawBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build bounds from min/max corners.
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Minimal rectangle containing every input.
    ///
    /// Returns `None` for an empty input.
    pub fn union<'a, I>(bounds: I) -> Option<RawBounds>
    where
        I: IntoIterator<Item = &'a RawBounds>,
    {
        let mut extents: Option<Extents> = None;
        for b in bounds {
            let e = extents.get_or_insert_with(|| Extents::at(b.x, b.y));
            e.include(b.x, b.y);
            e.include(b.right(), b.bottom());
        }
        extents.map(|e| e.to_bounds())
    }
}

/// Running min/max accumulator used while walking geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extents {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn to_bounds(self) -> RawBounds {
        RawBounds::from_extents(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_of_four_quadrants() {
        let parts = [
            RawBounds::new(0.0, 0.0, 10.0, 10.0),
            RawBounds::new(20.0, 0.0, 10.0, 10.0),
            RawBounds::new(0.0, 20.0, 10.0, 10.0),
            RawBounds::new(20.0, 20.0, 10.0, 10.0),
        ];
        let union = RawBounds::union(&parts).unwrap();
        assert_eq!(union, RawBounds::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_union_single() {
        let only = RawBounds::new(3.5, -2.0, 4.0, 1.0);
        assert_eq!(RawBounds::union([&only]), Some(only));
    }

    #[test]
    fn test_union_empty() {
        assert_eq!(RawBounds::union(std::iter::empty()), None);
    }

    #[test]
    fn test_union_nested() {
        let outer = RawBounds::new(0.0, 0.0, 100.0, 100.0);
        let inner = RawBounds::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(RawBounds::union([&inner, &outer]), Some(outer));
    }

    #[test]
    fn test_right_and_bottom() {
        let b = RawBounds::new(339.5, 196.0, 1243.0, 100.0);
        assert_eq!(b.right(), 1582.5);
        assert_eq!(b.bottom(), 296.0);
    }
}
