use crate::math::curve::curve::Curve;

/// `base(x - shift_x) + shift_y`.
#[derive(Debug, Clone)]
pub struct ShiftCurve<C> {
    base: C,
    shift_x: f64,
    shift_y: f64
}

impl<C: Curve> ShiftCurve<C> {
    pub fn new(base: C, shift_x: f64, shift_y: f64) -> ShiftCurve<C> {
        ShiftCurve { base, shift_x, shift_y }
    }
}

impl<C: Curve> Curve for ShiftCurve<C> {
    fn min_x(&self) -> f64 {
        self.base.min_x() + self.shift_x
    }

    fn max_x(&self) -> f64 {
        self.base.max_x() + self.shift_x
    }

    fn value(&self, x: f64) -> f64 {
        self.base.value(x - self.shift_x) + self.shift_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve::basic::logcurve::LogCurve;

    #[test]
    fn shifts_domain_and_values() {
        let shifted = ShiftCurve::new(LogCurve::new(10.0).unwrap(), 1.0, -2.0);
        assert_eq!(shifted.min_x(), 1.0);
        assert!((shifted.value(101.0) - 0.0).abs() < 1e-12);
        assert!(shifted.value(1.0).is_nan());
    }
}
