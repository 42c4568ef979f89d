//! Exact extrema of quadratic and cubic Bezier curves.
//!
//! Each function works on a single axis: pass the x coordinates to get the
//! extreme x values, the y coordinates for y. Endpoints are not included;
//! callers add those themselves.

/// Roots closer than this to zero are treated as zero.
const EPSILON: f64 = 1e-12;

/// Values of a 1-D cubic Bezier at every interior extremum (`0 < t < 1`).
pub fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    // B'(t) / 3 = a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;

    solve_quadratic(a, b, c)
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .map(|t| cubic_at(p0, p1, p2, p3, t))
        .collect()
}

/// Values of a 1-D quadratic Bezier at its interior extremum, if any.
pub fn quadratic_extrema(p0: f64, p1: f64, p2: f64) -> Vec<f64> {
    let denominator = p0 - 2.0 * p1 + p2;
    if denominator.abs() < EPSILON {
        return Vec::new();
    }
    let t = (p0 - p1) / denominator;
    if t > 0.0 && t < 1.0 {
        vec![quadratic_at(p0, p1, p2, t)]
    } else {
        Vec::new()
    }
}

fn cubic_at(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

fn quadratic_at(p0: f64, p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}

/// Real roots of `a t^2 + b t + c`, degrading to the linear case.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![-b / (2.0 * a)];
    }

    let root = discriminant.sqrt();
    vec![(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)]
}
