//! SVG path data (`d` attribute) parsing and bounding boxes.
//!
//! Relative commands, shorthand forms (`H`, `V`, `S`, `T`) and implicit
//! command repetition are normalized away, so every [`PathSegment`] is in
//! absolute coordinates.

use crate::error::{LayoutError, Result};

use super::arc::{arc_bounds, ArcParams};
use super::curve::{cubic_extrema, quadratic_extrema};
use super::{Extents, RawBounds};

type Point = (f64, f64);

/// A single absolute path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    Cubic { c1: Point, c2: Point, to: Point },
    Quadratic { c: Point, to: Point },
    Arc { params: ArcParams, to: Point },
    Close,
}

/// Parse path data into absolute segments.
pub fn parse_path(d: &str) -> Result<Vec<PathSegment>> {
    PathParser::new(d).parse()
}

/// Exact bounding box of path data, bezier and arc aware.
///
/// Returns `None` when the data is malformed or draws nothing.
pub fn path_bounds(d: &str) -> Option<RawBounds> {
    let segments = parse_path(d).ok()?;
    segments_bounds(&segments)
}

fn segments_bounds(segments: &[PathSegment]) -> Option<RawBounds> {
    let mut extents: Option<Extents> = None;
    let mut include = |x: f64, y: f64| {
        extents.get_or_insert_with(|| Extents::at(x, y)).include(x, y);
    };

    let mut current = (0.0, 0.0);
    let mut start = (0.0, 0.0);

    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => {
                include(p.0, p.1);
                current = p;
                start = p;
            }
            PathSegment::LineTo(p) => {
                include(p.0, p.1);
                current = p;
            }
            PathSegment::Cubic { c1, c2, to } => {
                include(to.0, to.1);
                for x in cubic_extrema(current.0, c1.0, c2.0, to.0) {
                    include(x, current.1);
                }
                for y in cubic_extrema(current.1, c1.1, c2.1, to.1) {
                    include(current.0, y);
                }
                current = to;
            }
            PathSegment::Quadratic { c, to } => {
                include(to.0, to.1);
                for x in quadratic_extrema(current.0, c.0, to.0) {
                    include(x, current.1);
                }
                for y in quadratic_extrema(current.1, c.1, to.1) {
                    include(current.0, y);
                }
                current = to;
            }
            PathSegment::Arc { params, to } => {
                let b = arc_bounds(current, params, to);
                include(b.x, b.y);
                include(b.right(), b.bottom());
                current = to;
            }
            PathSegment::Close => {
                current = start;
            }
        }
    }

    extents.map(|e| e.to_bounds())
}

struct PathParser<'a> {
    bytes: &'a [u8],
    pos: usize,
    current: Point,
    subpath_start: Point,
    last_cubic_control: Option<Point>,
    last_quad_control: Option<Point>,
    segments: Vec<PathSegment>,
}

impl<'a> PathParser<'a> {
    fn new(d: &'a str) -> Self {
        Self {
            bytes: d.as_bytes(),
            pos: 0,
            current: (0.0, 0.0),
            subpath_start: (0.0, 0.0),
            last_cubic_control: None,
            last_quad_control: None,
            segments: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<PathSegment>> {
        let mut command: Option<u8> = None;

        loop {
            self.skip_separators();
            let Some(&byte) = self.bytes.get(self.pos) else {
                break;
            };

            let cmd = if byte.is_ascii_alphabetic() {
                self.pos += 1;
                byte
            } else {
                // Implicit repetition: moveto continues as lineto
                match command {
                    Some(b'M') => b'L',
                    Some(b'm') => b'l',
                    Some(b'Z' | b'z') | None => {
                        return Err(self.error("expected a path command"));
                    }
                    Some(previous) => previous,
                }
            };

            if command.is_none() && !matches!(cmd, b'M' | b'm') {
                return Err(self.error("path data must start with a moveto"));
            }

            self.segment(cmd)?;
            command = Some(cmd);
        }

        Ok(self.segments)
    }

    fn segment(&mut self, cmd: u8) -> Result<()> {
        let relative = cmd.is_ascii_lowercase();
        let origin = if relative { self.current } else { (0.0, 0.0) };

        let segment = match cmd.to_ascii_uppercase() {
            b'M' => {
                let to = self.point(origin)?;
                self.subpath_start = to;
                PathSegment::MoveTo(to)
            }
            b'L' => PathSegment::LineTo(self.point(origin)?),
            b'H' => {
                let x = self.number()? + origin.0;
                PathSegment::LineTo((x, self.current.1))
            }
            b'V' => {
                let y = self.number()? + origin.1;
                PathSegment::LineTo((self.current.0, y))
            }
            b'C' => {
                let c1 = self.point(origin)?;
                let c2 = self.point(origin)?;
                let to = self.point(origin)?;
                PathSegment::Cubic { c1, c2, to }
            }
            b'S' => {
                let c1 = reflect(self.last_cubic_control, self.current);
                let c2 = self.point(origin)?;
                let to = self.point(origin)?;
                PathSegment::Cubic { c1, c2, to }
            }
            b'Q' => {
                let c = self.point(origin)?;
                let to = self.point(origin)?;
                PathSegment::Quadratic { c, to }
            }
            b'T' => {
                let c = reflect(self.last_quad_control, self.current);
                let to = self.point(origin)?;
                PathSegment::Quadratic { c, to }
            }
            b'A' => {
                let rx = self.number()?;
                let ry = self.number()?;
                let x_axis_rotation = self.number()?;
                let large_arc = self.flag()?;
                let sweep = self.flag()?;
                let to = self.point(origin)?;
                PathSegment::Arc {
                    params: ArcParams {
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                    },
                    to,
                }
            }
            b'Z' => PathSegment::Close,
            _ => {
                return Err(self.error(&format!("unknown path command '{}'", cmd as char)));
            }
        };

        self.last_cubic_control = None;
        self.last_quad_control = None;
        match segment {
            PathSegment::MoveTo(to) | PathSegment::LineTo(to) | PathSegment::Arc { to, .. } => {
                self.current = to;
            }
            PathSegment::Cubic { c2, to, .. } => {
                self.last_cubic_control = Some(c2);
                self.current = to;
            }
            PathSegment::Quadratic { c, to } => {
                self.last_quad_control = Some(c);
                self.current = to;
            }
            PathSegment::Close => {
                self.current = self.subpath_start;
            }
        }

        self.segments.push(segment);
        Ok(())
    }

    fn point(&mut self, origin: Point) -> Result<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok((origin.0 + x, origin.1 + y))
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let int_digits = self.digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.digits();
        }
        if int_digits == 0 && frac_digits == 0 {
            self.pos = start;
            return Err(self.error("expected a number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mark;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.error("path data is not valid UTF-8"))?;
        text.parse::<f64>()
            .map_err(|_| self.error(&format!("invalid number '{}'", text)))
    }

    /// Arc flags are a single `0` or `1` and may be written without separators.
    fn flag(&mut self) -> Result<bool> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error("expected an arc flag (0 or 1)")),
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: &str) -> LayoutError {
        LayoutError::Parse {
            message: format!("{} at offset {} in path data", message, self.pos),
            help: None,
        }
    }
}

/// Reflect the previous control point about the current point.
fn reflect(control: Option<Point>, current: Point) -> Point {
    match control {
        Some(c) => (2.0 * current.0 - c.0, 2.0 * current.1 - c.1),
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_cubic_bounds_use_true_extrema() {
        let bounds = path_bounds("M0 0 C50 -50 50 50 100 0").unwrap();
        let extent = 25.0 / 3.0_f64.sqrt();

        assert_close(bounds.x, 0.0);
        assert_close(bounds.width, 100.0);
        assert_close(bounds.y, -extent);
        assert_close(bounds.height, 2.0 * extent);
        assert!(bounds.height > 0.0);
        // Control points alone would claim 100
        assert!(bounds.height < 100.0);
    }

    #[test]
    fn test_rectangle_path() {
        let bounds = path_bounds("M10 20 H110 V70 H10 Z").unwrap();
        assert_eq!(bounds, RawBounds::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_relative_commands() {
        let bounds = path_bounds("m10,20 l100,0 l0,50 l-100,0 z").unwrap();
        assert_eq!(bounds, RawBounds::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let bounds = path_bounds("M0 0 10 0 10 10").unwrap();
        assert_eq!(bounds, RawBounds::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_compact_numbers() {
        let segments = parse_path("M.5.5L-1-2e1").unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::MoveTo((0.5, 0.5)),
                PathSegment::LineTo((-1.0, -20.0)),
            ]
        );
    }

    #[test]
    fn test_quadratic_bounds() {
        let bounds = path_bounds("M0 0 Q50 100 100 0").unwrap();
        assert_close(bounds.height, 50.0);
        assert_close(bounds.width, 100.0);
    }

    #[test]
    fn test_smooth_cubic_reflects_control() {
        let segments = parse_path("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
        assert_eq!(
            segments[2],
            PathSegment::Cubic {
                c1: (10.0, -10.0),
                c2: (20.0, -10.0),
                to: (20.0, 0.0),
            }
        );
    }

    #[test]
    fn test_smooth_quadratic_reflects_control() {
        let segments = parse_path("M0 0 Q5 10 10 0 T20 0").unwrap();
        assert_eq!(
            segments[2],
            PathSegment::Quadratic {
                c: (15.0, -10.0),
                to: (20.0, 0.0),
            }
        );
    }

    #[test]
    fn test_arc_with_compact_flags() {
        // Rounded corner written the way design tools export it
        let bounds = path_bounds("M0 10a10 10 0 0110-10h80v20H0z").unwrap();
        assert_close(bounds.x, 0.0);
        assert_close(bounds.y, 0.0);
        assert_close(bounds.width, 90.0);
        assert_close(bounds.height, 20.0);
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let bounds = path_bounds("M10 10 L20 10 Z l5 5").unwrap();
        assert_eq!(bounds, RawBounds::new(10.0, 10.0, 10.0, 5.0));
    }

    #[test]
    fn test_missing_moveto_is_rejected() {
        assert!(parse_path("L10 10").is_err());
        assert!(path_bounds("L10 10").is_none());
    }

    #[test]
    fn test_truncated_data_is_rejected() {
        assert!(path_bounds("M0 0 C10 10 20").is_none());
    }

    #[test]
    fn test_empty_data_has_no_bounds() {
        assert!(path_bounds("").is_none());
        assert!(path_bounds("   ").is_none());
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(parse_path("M0 0 X10 10").is_err());
    }
}
