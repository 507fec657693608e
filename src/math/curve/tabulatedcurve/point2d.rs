use std::fmt;
use std::hash::{
    Hash,
    Hasher
};

use serde::{
    Deserialize,
    Serialize
};

use crate::math::tolerance;

/// A single (x, y) sample.
///
/// Equality is tolerant (see [`tolerance::equals`]) and NaN coordinates
/// never compare equal, so `Point2D` is not `Eq`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    /// Linear interpolation on the segment `[lhs_pt, rhs_pt]`.
    pub fn interpolate(lhs_pt: &Point2D, rhs_pt: &Point2D, x: f64) -> f64 {
        lhs_pt.y + Point2D::slope(lhs_pt, rhs_pt) * (x - lhs_pt.x)
    }

    /// Bitwise hash of both coordinates, folded to 64 bits.
    ///
    /// Only a fast-reject filter: two tolerantly equal points whose
    /// coordinates differ in the last bits hash differently.
    pub fn hash_code(&self) -> u64 {
        coordinate_bits(self.x) ^ coordinate_bits(self.y).rotate_left(32)
    }
}

fn coordinate_bits(v: f64) -> u64 {
    // -0.0 == 0.0
    if v == 0.0 { 0 } else { v.to_bits() }
}

/// Locale independent rendering of a coordinate: `1.0`, `-0.25`, `NaN`,
/// `Infinity`.
pub(crate) fn format_coordinate(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_owned()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() }
    } else {
        format!("{:?}", v)
    }
}

impl PartialEq for Point2D {
    fn eq(&self, other: &Self) -> bool {
        tolerance::equals(self.x, other.x) && tolerance::equals(self.y, other.y)
    }
}

impl Hash for Point2D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", format_coordinate(self.x), format_coordinate(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_locale_independent() {
        assert_eq!(Point2D::new(1.0, -0.25).to_string(), "(1.0; -0.25)");
        assert_eq!(Point2D::new(f64::NAN, f64::INFINITY).to_string(), "(NaN; Infinity)");
    }

    #[test]
    fn copies_are_independent() {
        let original = Point2D::new(1.0, 2.0);
        let mut copy = original;
        copy.set_x(5.0);
        copy.set_y(6.0);
        assert_eq!(original.x(), 1.0);
        assert_eq!(original.y(), 2.0);
        assert_eq!(copy, Point2D::new(5.0, 6.0));
    }

    #[test]
    fn equality_is_tolerant() {
        assert_eq!(Point2D::new(1.0, 2.0), Point2D::new(1.0 + 1e-11, 2.0 - 1e-11));
        assert_ne!(Point2D::new(1.0, 2.0), Point2D::new(1.0, 2.01));
        let nan = Point2D::new(f64::NAN, 0.0);
        assert_ne!(nan, nan);
    }

    #[test]
    fn hash_ignores_sign_of_zero() {
        assert_eq!(Point2D::new(0.0, 1.0).hash_code(), Point2D::new(-0.0, 1.0).hash_code());
        assert_ne!(Point2D::new(1.0, 2.0).hash_code(), Point2D::new(2.0, 1.0).hash_code());
    }

    #[test]
    fn interpolation_on_segment() {
        let lhs = Point2D::new(0.0, 1.2);
        let rhs = Point2D::new(1.0, 3.8);
        assert!((Point2D::interpolate(&lhs, &rhs, 0.5) - 2.5).abs() < 1e-12);
        assert!((Point2D::slope(&lhs, &rhs) - 2.6).abs() < 1e-12);
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_string(&Point2D::new(0.5, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":2.0}"#);
        let back: Point2D = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point2D::new(0.5, 2.0));
    }
}
