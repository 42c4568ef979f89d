//! Layout tokens: canonical frame and center of a region.
//!
//! Every stored field is rounded to three decimals on its own. Derived
//! fields (`right`, `bottom`, the center) are computed from the rounded
//! fields and rounded again, so `right == x + width` holds for the values
//! that are actually written.

mod number;

use serde::{Deserialize, Serialize};

use crate::geometry::RawBounds;
use crate::resolve::ResolvedRegion;

pub use number::Coord;

/// Canonical rectangle of a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "FrameFields")]
pub struct CanonicalFrame {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
    pub height: Coord,
    pub right: Coord,
    pub bottom: Coord,
}

/// Stored fields of a frame; `right` and `bottom` are always recomputed.
#[derive(Deserialize)]
struct FrameFields {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<FrameFields> for CanonicalFrame {
    fn from(fields: FrameFields) -> Self {
        CanonicalFrame::new(fields.x, fields.y, fields.width, fields.height)
    }
}

impl CanonicalFrame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let x = Coord::canonical(x);
        let y = Coord::canonical(y);
        let width = Coord::canonical(width);
        let height = Coord::canonical(height);
        Self {
            x,
            y,
            width,
            height,
            right: Coord::canonical(x.value() + width.value()),
            bottom: Coord::canonical(y.value() + height.value()),
        }
    }

    pub fn from_raw(bounds: &RawBounds) -> Self {
        Self::new(bounds.x, bounds.y, bounds.width, bounds.height)
    }

    /// Midpoint of the frame.
    pub fn center(&self) -> CanonicalCenter {
        CanonicalCenter {
            x: Coord::canonical(self.x.value() + self.width.value() / 2.0),
            y: Coord::canonical(self.y.value() + self.height.value() / 2.0),
        }
    }

    pub fn to_raw(&self) -> RawBounds {
        RawBounds::new(
            self.x.value(),
            self.y.value(),
            self.width.value(),
            self.height.value(),
        )
    }
}

/// Canonical midpoint of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCenter {
    pub x: Coord,
    pub y: Coord,
}

/// A region's published coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutToken {
    pub key: String,
    pub description: String,
    pub frame: CanonicalFrame,
    pub center: CanonicalCenter,
}

impl LayoutToken {
    /// Canonicalize raw bounds into a token.
    pub fn new(key: &str, description: &str, bounds: &RawBounds) -> Self {
        let frame = CanonicalFrame::from_raw(bounds);
        Self {
            key: key.to_string(),
            description: description.to_string(),
            center: frame.center(),
            frame,
        }
    }
}

impl From<&ResolvedRegion> for LayoutToken {
    fn from(region: &ResolvedRegion) -> Self {
        LayoutToken::new(&region.key, &region.description, &region.bounds)
    }
}

/// Tokens for resolved regions, in the same order.
pub fn build_tokens(regions: &[ResolvedRegion]) -> Vec<LayoutToken> {
    regions.iter().map(LayoutToken::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.001;

    #[test]
    fn test_frame_edges_are_consistent() {
        let token = LayoutToken::new("CARD", "", &RawBounds::new(339.4996, 196.0004, 1243.0004, 99.9996));
        let frame = token.frame;

        assert_eq!(frame.x.to_string(), "339.5");
        assert_eq!(frame.width.to_string(), "1243");
        assert_eq!(frame.right.to_string(), "1582.5");
        assert_eq!(frame.bottom.to_string(), "296");
        assert!((frame.right.value() - (frame.x.value() + frame.width.value())).abs() < TOLERANCE);
        assert!((frame.bottom.value() - (frame.y.value() + frame.height.value())).abs() < TOLERANCE);
    }

    #[test]
    fn test_center_is_frame_midpoint() {
        let token = LayoutToken::new("CARD", "", &RawBounds::new(339.5, 196.0, 1243.0, 100.0));
        assert_eq!(token.center.x.to_string(), "961");
        assert_eq!(token.center.y.to_string(), "246");
    }

    #[test]
    fn test_right_uses_rounded_fields() {
        // 0.0004 + 0.0004 would round to 0.001 if summed first.
        let frame = CanonicalFrame::new(0.0004, 0.0, 0.0004, 1.0);
        assert_eq!(frame.x.value(), 0.0);
        assert_eq!(frame.width.value(), 0.0);
        assert_eq!(frame.right.value(), 0.0);
    }

    #[test]
    fn test_frame_deserialize_recomputes_edges() {
        let frame: CanonicalFrame =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4,"right":99,"bottom":99}"#)
                .unwrap();
        assert_eq!(frame, CanonicalFrame::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(frame.right.value(), 4.0);
    }

    #[test]
    fn test_frame_deserialize_without_edges() {
        let frame: CanonicalFrame =
            serde_json::from_str(r#"{"x":0.5,"y":0,"width":10,"height":10}"#).unwrap();
        assert_eq!(frame.right.to_string(), "10.5");
    }

    #[test]
    fn test_build_tokens_keeps_order() {
        use crate::resolve::BoundsSource;

        let regions = vec![
            ResolvedRegion {
                key: "B".to_string(),
                description: "second letter".to_string(),
                bounds: RawBounds::new(0.0, 0.0, 1.0, 1.0),
                source: BoundsSource::Mask,
            },
            ResolvedRegion {
                key: "A".to_string(),
                description: "first letter".to_string(),
                bounds: RawBounds::new(1.0, 1.0, 1.0, 1.0),
                source: BoundsSource::Path,
            },
        ];
        let tokens = build_tokens(&regions);
        assert_eq!(tokens[0].key, "B");
        assert_eq!(tokens[1].key, "A");
        assert_eq!(tokens[1].description, "first letter");
    }
}
