use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::Curve;
use crate::math::curve::tabulatedcurve::arraytabulatedcurve::ArrayTabulatedCurve;
use crate::math::curve::tabulatedcurve::linkedlisttabulatedcurve::LinkedListTabulatedCurve;
use crate::math::curve::tabulatedcurve::point2d::Point2D;
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::{
    TabulatedCurveError,
    TabulatedCurveResult
};
use crate::math::tolerance;

pub const MIN_POINTS_COUNT: usize = 2;

// ─────────────────────────────────────────────────────────────────────────────
// TabulatedCurve
// ─────────────────────────────────────────────────────────────────────────────
//
// 以有限個樣本點 (x_i, y_i) 表示的曲線，x_i 嚴格遞增（容差比較），
// 任何時刻至少 2 個點。樣本之間以線性插值求值：
//
//   f(x) = y_1 + (y_2 - y_1)·(x - x_1)/(x_2 - x_1)
//
// 存取器一律回傳複本，外部無法繞過排序不變量直接修改內部點。

pub trait TabulatedCurve: Curve + fmt::Display + fmt::Debug {
    fn points_count(&self) -> usize;

    fn left_domain_border(&self) -> TabulatedCurveResult<f64>;

    fn right_domain_border(&self) -> TabulatedCurveResult<f64>;

    /// NaN outside the domain; the exact sample y on a knot.
    fn function_value(&self, x: f64) -> f64;

    fn point(&self, index: usize) -> TabulatedCurveResult<Point2D>;

    fn point_x(&self, index: usize) -> TabulatedCurveResult<f64> {
        self.point(index).map(|pt| pt.x())
    }

    fn point_y(&self, index: usize) -> TabulatedCurveResult<f64> {
        self.point(index).map(|pt| pt.y())
    }

    fn set_point(&mut self, index: usize, point: Point2D) -> TabulatedCurveResult<()>;

    fn set_point_x(&mut self, index: usize, x: f64) -> TabulatedCurveResult<()>;

    fn set_point_y(&mut self, index: usize, y: f64) -> TabulatedCurveResult<()>;

    fn delete_point(&mut self, index: usize) -> TabulatedCurveResult<()>;

    fn add_point(&mut self, point: Point2D) -> TabulatedCurveResult<()>;

    /// Snapshot of every point in ascending x order.
    fn points(&self) -> Vec<Point2D>;

    /// `points_count` folded by XOR with every point hash. Tables that only
    /// differ in point order may collide.
    fn hash_code(&self) -> u64 {
        hash_points(self.points_count(), self.points())
    }

    fn clone_box(&self) -> Box<dyn TabulatedCurve>;
}

impl Clone for Box<dyn TabulatedCurve> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn TabulatedCurve {
    fn eq(&self, other: &Self) -> bool {
        curves_equal(self, other)
    }
}

/// Structural equality regardless of the storage behind either side.
pub fn curves_equal(lhs: &dyn TabulatedCurve, rhs: &dyn TabulatedCurve) -> bool {
    lhs.points_count() == rhs.points_count() && lhs.points() == rhs.points()
}

pub(crate) fn hash_points<I>(count: usize, points: I) -> u64
where
    I: IntoIterator<Item = Point2D>
{
    points
        .into_iter()
        .fold(count as u64, |h, pt| h ^ pt.hash_code())
}

pub(crate) fn fmt_points<I>(f: &mut fmt::Formatter<'_>, points: I) -> fmt::Result
where
    I: IntoIterator<Item = Point2D>
{
    write!(f, "{{")?;
    for (i, pt) in points.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", pt)?;
    }
    write!(f, "}}")
}

/// Knot lookup first, then the bracketing segment, so that x on a knot
/// never divides by a near-zero width.
pub(crate) fn interpolate<I>(points: I, x: f64) -> f64
where
    I: Iterator<Item = Point2D> + Clone
{
    let mut knots = points.clone();
    let Some(first) = knots.next() else {
        return f64::NAN;
    };
    let last = knots.last().unwrap_or(first);
    if tolerance::less(x, first.x()) || tolerance::greater(x, last.x()) {
        return f64::NAN;
    }

    if let Some(knot) = points.clone().find(|pt| tolerance::equals(x, pt.x())) {
        return knot.y();
    }

    points
        .clone()
        .zip(points.skip(1))
        .find(|(lhs, rhs)| {
            tolerance::greater_or_equals(x, lhs.x()) && tolerance::less_or_equals(x, rhs.x())
        })
        .map_or(f64::NAN, |(lhs, rhs)| Point2D::interpolate(&lhs, &rhs, x))
}

pub(crate) fn check_index(index: usize, count: usize) -> TabulatedCurveResult<()> {
    if index >= count {
        Err(TabulatedCurveError::IndexOutOfRange { index, count })
    } else {
        Ok(())
    }
}

/// `prev_x < x < next_x` under the tolerant comparator; a missing neighbour
/// is skipped.
pub(crate) fn check_neighbours(x: f64,
                               prev_x: Option<f64>,
                               next_x: Option<f64>) -> TabulatedCurveResult<()> {
    let lower_ok = prev_x.map_or(true, |lower| tolerance::greater(x, lower));
    let upper_ok = next_x.map_or(true, |upper| tolerance::less(x, upper));
    if lower_ok && upper_ok {
        Ok(())
    } else {
        Err(TabulatedCurveError::OrderingViolation {
            x,
            lower: prev_x.unwrap_or(f64::NEG_INFINITY),
            upper: next_x.unwrap_or(f64::INFINITY)
        })
    }
}

/// NaN has no place in an ascending order.
pub(crate) fn check_insertable(x: f64) -> TabulatedCurveResult<()> {
    if x.is_nan() {
        Err(TabulatedCurveError::OrderingViolation {
            x,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY
        })
    } else {
        Ok(())
    }
}

pub(crate) fn check_deletable(count: usize) -> TabulatedCurveResult<()> {
    if count <= MIN_POINTS_COUNT {
        Err(TabulatedCurveError::InvariantViolation { count })
    } else {
        Ok(())
    }
}

pub(crate) fn validate_points(points: &[Point2D]) -> TabulatedCurveResult<()> {
    if points.len() < MIN_POINTS_COUNT {
        return Err(TabulatedCurveError::invalid_construction(
            format!("at least {} points required, {} given", MIN_POINTS_COUNT, points.len())
        ));
    }
    match points.windows(2).position(|pair| !tolerance::less(pair[0].x(), pair[1].x())) {
        Some(i) => Err(TabulatedCurveError::invalid_construction(
            format!("points {} and {} are not strictly ascending by x", i, i + 1)
        )),
        None => Ok(())
    }
}

/// Evenly spaced grid on `[left_x, right_x]` carrying `values` as y.
pub(crate) fn uniform_grid(left_x: f64,
                           right_x: f64,
                           values: &[f64]) -> TabulatedCurveResult<Vec<Point2D>> {
    if !(left_x < right_x) {
        return Err(TabulatedCurveError::invalid_construction(
            format!("left bound must be less than right bound: {} >= {}", left_x, right_x)
        ));
    }
    if values.len() < MIN_POINTS_COUNT {
        return Err(TabulatedCurveError::invalid_construction(
            format!("at least {} points required, {} given", MIN_POINTS_COUNT, values.len())
        ));
    }
    let step = (right_x - left_x) / (values.len() - 1) as f64;
    let points: Vec<Point2D> = values
        .iter()
        .enumerate()
        .map(|(i, &y)| Point2D::new(left_x + i as f64 * step, y))
        .collect();
    validate_points(&points)?;
    Ok(points)
}

// ─────────────────────────────────────────────────────────────────────────────
// TabulatedCurveBackend
// ─────────────────────────────────────────────────────────────────────────────

/// Storage strategy selector, used where the backend is chosen at runtime
/// (named curve definitions).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum TabulatedCurveBackend {
    Array,
    LinkedList
}

impl TabulatedCurveBackend {
    pub fn from_points(&self, points: &[Point2D]) -> TabulatedCurveResult<Box<dyn TabulatedCurve>> {
        let curve: Box<dyn TabulatedCurve> = match self {
            TabulatedCurveBackend::Array => Box::new(ArrayTabulatedCurve::new(points)?),
            TabulatedCurveBackend::LinkedList => Box::new(LinkedListTabulatedCurve::new(points)?)
        };
        Ok(curve)
    }

    pub fn from_values(&self,
                       left_x: f64,
                       right_x: f64,
                       values: &[f64]) -> TabulatedCurveResult<Box<dyn TabulatedCurve>> {
        let curve: Box<dyn TabulatedCurve> = match self {
            TabulatedCurveBackend::Array => {
                Box::new(ArrayTabulatedCurve::from_values(left_x, right_x, values)?)
            },
            TabulatedCurveBackend::LinkedList => {
                Box::new(LinkedListTabulatedCurve::from_values(left_x, right_x, values)?)
            }
        };
        Ok(curve)
    }

    pub fn from_bounds(&self,
                       left_x: f64,
                       right_x: f64,
                       points_count: usize) -> TabulatedCurveResult<Box<dyn TabulatedCurve>> {
        self.from_values(left_x, right_x, &vec![0.0; points_count])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knots() -> Vec<Point2D> {
        vec![Point2D::new(0.0, 1.2), Point2D::new(1.0, 3.8), Point2D::new(2.0, 15.2)]
    }

    #[test]
    fn interpolate_prefers_knots() {
        let points = knots();
        assert_eq!(interpolate(points.iter().copied(), 1.0 + 1e-11), 3.8);
        assert!((interpolate(points.iter().copied(), 0.5) - 2.5).abs() < 1e-12);
        assert!(interpolate(points.iter().copied(), 2.001).is_nan());
        assert!(interpolate(points.iter().copied(), f64::NAN).is_nan());
        assert!(interpolate(std::iter::empty::<Point2D>(), 0.0).is_nan());
    }

    #[test]
    fn validate_rejects_ties_within_tolerance() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(1e-11, 1.0)];
        assert!(matches!(
            validate_points(&points),
            Err(TabulatedCurveError::InvalidConstruction(_))
        ));
        assert!(validate_points(&knots()).is_ok());
        assert!(validate_points(&knots()[..1]).is_err());
    }

    #[test]
    fn uniform_grid_spacing() {
        let grid = uniform_grid(0.0, 1.0, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[2], Point2D::new(0.5, 3.0));
        assert_eq!(grid[4].x(), 1.0);
        assert!(uniform_grid(1.0, 1.0, &[0.0, 0.0]).is_err());
        assert!(uniform_grid(f64::NAN, 1.0, &[0.0, 0.0]).is_err());
        assert!(uniform_grid(0.0, 1e-9, &[0.0; 100]).is_err());
    }

    #[test]
    fn neighbour_check_skips_missing_side() {
        assert!(check_neighbours(5.0, None, Some(6.0)).is_ok());
        assert!(check_neighbours(5.0, Some(4.0), None).is_ok());
        assert_eq!(
            check_neighbours(4.0 + 1e-11, Some(4.0), None),
            Err(TabulatedCurveError::OrderingViolation {
                x: 4.0 + 1e-11,
                lower: 4.0,
                upper: f64::INFINITY
            })
        );
    }

    #[test]
    fn backend_builds_equal_curves() {
        let array = TabulatedCurveBackend::Array.from_points(&knots()).unwrap();
        let list = TabulatedCurveBackend::LinkedList.from_points(&knots()).unwrap();
        assert!(curves_equal(array.as_ref(), list.as_ref()));
        assert_eq!(array.hash_code(), list.hash_code());

        let zeros = TabulatedCurveBackend::LinkedList.from_bounds(0.0, 4.0, 5).unwrap();
        assert_eq!(zeros.points_count(), 5);
        assert_eq!(zeros.point(3).unwrap(), Point2D::new(3.0, 0.0));
    }

    #[test]
    fn backend_deserializes_from_variant_name() {
        let backend: TabulatedCurveBackend = serde_json::from_str("\"LinkedList\"").unwrap();
        assert_eq!(backend, TabulatedCurveBackend::LinkedList);
    }
}
