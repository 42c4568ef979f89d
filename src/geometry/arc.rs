//! Bounding box of an SVG elliptical arc segment.
//!
//! The arc is converted from endpoint to center parameterization, then the
//! angles where each axis reaches an extremum are tested against the swept
//! range. The result is exact, unlike sampling or bezier approximation.

use std::f64::consts::{PI, TAU};

use super::{Extents, RawBounds};

/// Elliptical arc parameters, as written in path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Bounds of the arc from `from` to `to`, endpoints included.
pub fn arc_bounds(from: (f64, f64), params: ArcParams, to: (f64, f64)) -> RawBounds {
    let mut extents = Extents::at(from.0, from.1);
    extents.include(to.0, to.1);

    if from == to {
        return extents.to_bounds();
    }
    let (mut rx, mut ry) = (params.rx.abs(), params.ry.abs());
    if rx == 0.0 || ry == 0.0 {
        // Degenerate radii draw a straight line.
        return extents.to_bounds();
    }

    let phi = params.x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx = (from.0 - to.0) / 2.0;
    let dy = (from.1 - to.1) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let numerator = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let denominator = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let mut coef = if denominator == 0.0 {
        0.0
    } else {
        (numerator / denominator).max(0.0).sqrt()
    };
    if params.large_arc == params.sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let cx = cos_phi * cxp - sin_phi * cyp + (from.0 + to.0) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.1 + to.1) / 2.0;

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let start = vector_angle(1.0, 0.0, ux, uy);
    let mut sweep = vector_angle(ux, uy, vx, vy);
    if !params.sweep && sweep > 0.0 {
        sweep -= TAU;
    } else if params.sweep && sweep < 0.0 {
        sweep += TAU;
    }

    let theta_x = (-ry * sin_phi).atan2(rx * cos_phi);
    let theta_y = (ry * cos_phi).atan2(rx * sin_phi);

    for theta in [theta_x, theta_x + PI, theta_y, theta_y + PI] {
        if angle_in_sweep(theta, start, sweep) {
            let (sin_t, cos_t) = theta.sin_cos();
            let x = cx + rx * cos_phi * cos_t - ry * sin_phi * sin_t;
            let y = cy + rx * sin_phi * cos_t + ry * cos_phi * sin_t;
            extents.include(x, y);
        }
    }

    extents.to_bounds()
}

/// Signed angle from vector u to vector v.
fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
}

fn angle_in_sweep(theta: f64, start: f64, sweep: f64) -> bool {
    if sweep >= 0.0 {
        (theta - start).rem_euclid(TAU) <= sweep
    } else {
        (start - theta).rem_euclid(TAU) <= -sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rx: f64, ry: f64, large_arc: bool, sweep: bool) -> ArcParams {
        ArcParams {
            rx,
            ry,
            x_axis_rotation: 0.0,
            large_arc,
            sweep,
        }
    }

    fn assert_bounds(actual: RawBounds, expected: RawBounds) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(actual.x, expected.x)
                && close(actual.y, expected.y)
                && close(actual.width, expected.width)
                && close(actual.height, expected.height),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_half_circle_bulges_up() {
        // From (0,0) to (20,0), radius 10, clockwise on screen
        let bounds = arc_bounds((0.0, 0.0), params(10.0, 10.0, false, true), (20.0, 0.0));
        assert_bounds(bounds, RawBounds::new(0.0, -10.0, 20.0, 10.0));
    }

    #[test]
    fn test_half_circle_bulges_down() {
        let bounds = arc_bounds((0.0, 0.0), params(10.0, 10.0, false, false), (20.0, 0.0));
        assert_bounds(bounds, RawBounds::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_quarter_arc_has_no_interior_extremum() {
        // Quarter circle centred at (0,10): endpoints are the extremes
        let bounds = arc_bounds((0.0, 0.0), params(10.0, 10.0, false, true), (10.0, 10.0));
        assert_bounds(bounds, RawBounds::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_large_arc_wraps_around() {
        // Three quarters of a circle of radius 10 centred at (10,0)
        let bounds = arc_bounds((0.0, 0.0), params(10.0, 10.0, true, false), (10.0, -10.0));
        assert_bounds(bounds, RawBounds::new(0.0, -10.0, 20.0, 20.0));
    }

    #[test]
    fn test_radii_too_small_are_scaled_up() {
        let bounds = arc_bounds((0.0, 0.0), params(1.0, 1.0, false, true), (20.0, 0.0));
        assert_bounds(bounds, RawBounds::new(0.0, -10.0, 20.0, 10.0));
    }

    #[test]
    fn test_zero_radius_is_a_line() {
        let bounds = arc_bounds((0.0, 0.0), params(0.0, 5.0, false, true), (10.0, 4.0));
        assert_bounds(bounds, RawBounds::new(0.0, 0.0, 10.0, 4.0));
    }

    #[test]
    fn test_rotated_ellipse() {
        // Ellipse rx=20, ry=10 rotated 90deg is tall; half of it from top to bottom
        let arc = ArcParams {
            rx: 20.0,
            ry: 10.0,
            x_axis_rotation: 90.0,
            large_arc: false,
            sweep: true,
        };
        let bounds = arc_bounds((0.0, -20.0), arc, (0.0, 20.0));
        assert_bounds(bounds, RawBounds::new(0.0, -20.0, 10.0, 40.0));
    }
}
