use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A coordinate rounded to three decimal places.
///
/// Negative zero is normalized to zero. Integral values print and
/// serialize without a decimal point (`10`, not `10.0`), fractional ones
/// with their shortest exact form (`10.5`, `10.123`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Coord(f64);

impl Coord {
    /// Round `value` to three decimals.
    pub fn canonical(value: f64) -> Self {
        let rounded = (value * 1000.0).round() / 1000.0;
        if rounded == 0.0 {
            Coord(0.0)
        } else {
            Coord(rounded)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER
    }
}

impl From<Coord> for f64 {
    fn from(coord: Coord) -> f64 {
        coord.0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_integral() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Coord::canonical)
    }
}
