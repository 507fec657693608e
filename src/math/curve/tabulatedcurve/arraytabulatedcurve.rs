use std::fmt;
use std::hash::{
    Hash,
    Hasher
};

use crate::math::curve::curve::Curve;
use crate::math::curve::tabulatedcurve::linkedlisttabulatedcurve::LinkedListTabulatedCurve;
use crate::math::curve::tabulatedcurve::point2d::Point2D;
use crate::math::curve::tabulatedcurve::tabulatedcurve::{
    check_deletable,
    check_index,
    check_insertable,
    check_neighbours,
    curves_equal,
    fmt_points,
    hash_points,
    interpolate,
    uniform_grid,
    validate_points,
    TabulatedCurve
};
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::{
    TabulatedCurveError,
    TabulatedCurveResult
};
use crate::math::tolerance;

/// Slack slots allocated on top of the initial point count.
const CAPACITY_SLACK: usize = 5;

/// Tabulated curve over a contiguous buffer.
///
/// `points.len()` is the logical point count; `points.capacity()` is the
/// buffer size, grown by half (plus one) whenever an insertion finds it full.
#[derive(Debug)]
pub struct ArrayTabulatedCurve {
    points: Vec<Point2D>
}

impl ArrayTabulatedCurve {
    /// Copies `points`, which must hold at least two samples strictly
    /// ascending by x.
    pub fn new(points: &[Point2D]) -> TabulatedCurveResult<ArrayTabulatedCurve> {
        validate_points(points)?;
        Ok(Self::from_valid_points(points))
    }

    /// `points_count` evenly spaced samples on `[left_x, right_x]` with y = 0.
    pub fn from_bounds(left_x: f64,
                       right_x: f64,
                       points_count: usize) -> TabulatedCurveResult<ArrayTabulatedCurve> {
        Self::from_values(left_x, right_x, &vec![0.0; points_count])
    }

    /// Evenly spaced samples on `[left_x, right_x]` carrying `values` as y.
    pub fn from_values(left_x: f64,
                       right_x: f64,
                       values: &[f64]) -> TabulatedCurveResult<ArrayTabulatedCurve> {
        let grid = uniform_grid(left_x, right_x, values)?;
        Ok(Self::from_valid_points(&grid))
    }

    fn from_valid_points(points: &[Point2D]) -> ArrayTabulatedCurve {
        let mut buffer = Vec::with_capacity(points.len() + CAPACITY_SLACK);
        buffer.extend_from_slice(points);
        ArrayTabulatedCurve { points: buffer }
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    fn ensure_capacity(&mut self) {
        let capacity = self.points.capacity();
        if self.points.len() == capacity {
            let new_capacity = capacity * 3 / 2 + 1;
            self.points.reserve_exact(new_capacity - self.points.len());
        }
    }

    fn neighbours_x(&self, index: usize) -> (Option<f64>, Option<f64>) {
        let prev_x = index.checked_sub(1).map(|i| self.points[i].x());
        let next_x = self.points.get(index + 1).map(|pt| pt.x());
        (prev_x, next_x)
    }
}

impl TabulatedCurve for ArrayTabulatedCurve {
    fn points_count(&self) -> usize {
        self.points.len()
    }

    fn left_domain_border(&self) -> TabulatedCurveResult<f64> {
        self.points
            .first()
            .map(|pt| pt.x())
            .ok_or(TabulatedCurveError::EmptyState)
    }

    fn right_domain_border(&self) -> TabulatedCurveResult<f64> {
        self.points
            .last()
            .map(|pt| pt.x())
            .ok_or(TabulatedCurveError::EmptyState)
    }

    fn function_value(&self, x: f64) -> f64 {
        interpolate(self.points.iter().copied(), x)
    }

    fn point(&self, index: usize) -> TabulatedCurveResult<Point2D> {
        check_index(index, self.points.len())?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: Point2D) -> TabulatedCurveResult<()> {
        check_index(index, self.points.len())?;
        let (prev_x, next_x) = self.neighbours_x(index);
        check_neighbours(point.x(), prev_x, next_x)?;
        self.points[index] = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> TabulatedCurveResult<()> {
        check_index(index, self.points.len())?;
        let (prev_x, next_x) = self.neighbours_x(index);
        check_neighbours(x, prev_x, next_x)?;
        self.points[index].set_x(x);
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> TabulatedCurveResult<()> {
        check_index(index, self.points.len())?;
        self.points[index].set_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> TabulatedCurveResult<()> {
        check_deletable(self.points.len())?;
        check_index(index, self.points.len())?;
        self.points.remove(index);
        Ok(())
    }

    fn add_point(&mut self, point: Point2D) -> TabulatedCurveResult<()> {
        check_insertable(point.x())?;
        let insert_index = self.points
            .iter()
            .position(|pt| !tolerance::less(pt.x(), point.x()))
            .unwrap_or(self.points.len());

        if let Some(existing) = self.points.get(insert_index) {
            if tolerance::equals(existing.x(), point.x()) {
                return Err(TabulatedCurveError::DuplicatePoint(point.x()));
            }
        }

        self.ensure_capacity();
        self.points.insert(insert_index, point);
        Ok(())
    }

    fn points(&self) -> Vec<Point2D> {
        self.points.clone()
    }

    fn hash_code(&self) -> u64 {
        hash_points(self.points.len(), self.points.iter().copied())
    }

    fn clone_box(&self) -> Box<dyn TabulatedCurve> {
        Box::new(self.clone())
    }
}

impl Curve for ArrayTabulatedCurve {
    fn min_x(&self) -> f64 {
        self.left_domain_border().unwrap_or(f64::NAN)
    }

    fn max_x(&self) -> f64 {
        self.right_domain_border().unwrap_or(f64::NAN)
    }

    fn value(&self, x: f64) -> f64 {
        self.function_value(x)
    }
}

impl Clone for ArrayTabulatedCurve {
    /// Fresh buffer with the constructor's slack, not the source capacity.
    fn clone(&self) -> Self {
        Self::from_valid_points(&self.points)
    }
}

impl fmt::Display for ArrayTabulatedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(f, self.points.iter().copied())
    }
}

impl PartialEq for ArrayTabulatedCurve {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl PartialEq<LinkedListTabulatedCurve> for ArrayTabulatedCurve {
    fn eq(&self, other: &LinkedListTabulatedCurve) -> bool {
        curves_equal(self, other)
    }
}

impl Hash for ArrayTabulatedCurve {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArrayTabulatedCurve {
        ArrayTabulatedCurve::new(&[
            Point2D::new(0.0, 1.2),
            Point2D::new(1.0, 3.8),
            Point2D::new(2.0, 15.2)
        ]).unwrap()
    }

    fn xs(curve: &ArrayTabulatedCurve) -> Vec<f64> {
        curve.points().iter().map(|pt| pt.x()).collect()
    }

    #[test]
    fn construction_keeps_slack() {
        let curve = sample();
        assert_eq!(curve.points_count(), 3);
        assert!(curve.capacity() >= 3 + CAPACITY_SLACK);
        assert_eq!(curve.left_domain_border(), Ok(0.0));
        assert_eq!(curve.right_domain_border(), Ok(2.0));
    }

    #[test]
    fn construction_rejects_bad_input() {
        assert!(ArrayTabulatedCurve::new(&[Point2D::new(0.0, 0.0)]).is_err());
        assert!(ArrayTabulatedCurve::new(&[Point2D::new(1.0, 0.0), Point2D::new(0.0, 0.0)]).is_err());
        assert!(ArrayTabulatedCurve::from_bounds(1.0, 0.0, 3).is_err());
        assert!(ArrayTabulatedCurve::from_bounds(0.0, 1.0, 1).is_err());
        assert!(ArrayTabulatedCurve::from_values(0.0, 1.0, &[]).is_err());
    }

    #[test]
    fn from_values_spreads_grid() {
        let curve = ArrayTabulatedCurve::from_values(-1.0, 1.0, &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(xs(&curve), vec![-1.0, 0.0, 1.0]);
        assert_eq!(curve.point_y(1), Ok(5.0));
    }

    #[test]
    fn value_lookup() {
        let curve = sample();
        assert!((curve.function_value(0.5) - 2.5).abs() < 1e-12);
        assert_eq!(curve.function_value(2.0), 15.2);
        assert!(curve.function_value(-0.001).is_nan());
        assert!(curve.function_value(2.001).is_nan());
        assert_eq!(curve.value(1.0), 3.8);
    }

    #[test]
    fn add_point_keeps_order_and_grows() {
        let mut curve = ArrayTabulatedCurve::from_bounds(0.0, 1.0, 2).unwrap();
        for i in 0..20 {
            curve.add_point(Point2D::new(1.5 + i as f64, i as f64)).unwrap();
        }
        curve.add_point(Point2D::new(-1.0, 7.0)).unwrap();
        curve.add_point(Point2D::new(0.5, 3.0)).unwrap();
        assert_eq!(curve.points_count(), 24);
        assert!(curve.capacity() >= 24);
        let x = xs(&curve);
        assert!(x.windows(2).all(|pair| tolerance::less(pair[0], pair[1])));
        assert_eq!(curve.point(0), Ok(Point2D::new(-1.0, 7.0)));
        assert_eq!(curve.point(2), Ok(Point2D::new(0.5, 3.0)));
    }

    #[test]
    fn add_point_rejects_duplicate() {
        let mut curve = sample();
        assert_eq!(
            curve.add_point(Point2D::new(1.0 + 1e-11, 9.0)),
            Err(TabulatedCurveError::DuplicatePoint(1.0 + 1e-11))
        );
        assert_eq!(curve, sample());
    }

    #[test]
    fn set_point_x_respects_neighbours() {
        let mut curve = sample();
        assert!(curve.set_point_x(1, 1.5).is_ok());
        assert!(matches!(
            curve.set_point_x(1, 2.0),
            Err(TabulatedCurveError::OrderingViolation { .. })
        ));
        assert!(curve.set_point_x(0, -10.0).is_ok());
        assert!(curve.set_point_x(2, 100.0).is_ok());
        assert!(curve.set_point(1, Point2D::new(-10.0, 0.0)).is_err());
        assert!(curve.set_point(1, Point2D::new(50.0, 0.0)).is_ok());
        assert_eq!(xs(&curve), vec![-10.0, 50.0, 100.0]);
        assert_eq!(
            curve.set_point_x(3, 0.0),
            Err(TabulatedCurveError::IndexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn delete_point_guards_minimum() {
        let mut curve = sample();
        assert_eq!(
            curve.delete_point(7),
            Err(TabulatedCurveError::IndexOutOfRange { index: 7, count: 3 })
        );
        curve.delete_point(1).unwrap();
        assert_eq!(xs(&curve), vec![0.0, 2.0]);
        assert_eq!(
            curve.delete_point(0),
            Err(TabulatedCurveError::InvariantViolation { count: 2 })
        );
        assert_eq!(curve.points_count(), 2);
    }

    #[test]
    fn display_lists_points() {
        assert_eq!(sample().to_string(), "{(0.0; 1.2), (1.0; 3.8), (2.0; 15.2)}");
    }

    #[test]
    fn clone_is_independent() {
        let mut curve = sample();
        let copy = curve.clone();
        curve.set_point_y(0, 100.0).unwrap();
        assert_eq!(copy.point_y(0), Ok(1.2));
        assert_ne!(curve, copy);
        assert_ne!(curve.hash_code(), copy.hash_code());
    }

    #[test]
    fn empty_buffer_reports_empty_state() {
        let curve = ArrayTabulatedCurve { points: Vec::new() };
        assert_eq!(curve.left_domain_border(), Err(TabulatedCurveError::EmptyState));
        assert_eq!(curve.right_domain_border(), Err(TabulatedCurveError::EmptyState));
        assert!(curve.function_value(0.0).is_nan());
        assert!(curve.min_x().is_nan());
    }
}
