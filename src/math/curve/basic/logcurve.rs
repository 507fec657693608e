use crate::math::curve::curve::Curve;
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::{
    TabulatedCurveError,
    TabulatedCurveResult
};

/// `log_base(x)` on `[0, +inf)`; NaN for `x <= 0`.
#[derive(Debug, Clone, Copy)]
pub struct LogCurve {
    base: f64
}

impl LogCurve {
    pub fn new(base: f64) -> TabulatedCurveResult<LogCurve> {
        if !(base > 0.0) || (base - 1.0).abs() < 1e-15 {
            return Err(TabulatedCurveError::invalid_construction(
                format!("logarithm base must be positive and differ from 1, got {}", base)
            ));
        }
        Ok(LogCurve { base })
    }

    pub fn natural() -> LogCurve {
        LogCurve { base: std::f64::consts::E }
    }
}

impl Curve for LogCurve {
    fn min_x(&self) -> f64 {
        0.0
    }

    fn max_x(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NAN;
        }
        x.ln() / self.base.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base() {
        assert!(LogCurve::new(0.0).is_err());
        assert!(LogCurve::new(-2.0).is_err());
        assert!(LogCurve::new(1.0).is_err());
        assert!(LogCurve::new(f64::NAN).is_err());
    }

    #[test]
    fn evaluates_logarithm() {
        let log2 = LogCurve::new(2.0).unwrap();
        assert!((log2.value(8.0) - 3.0).abs() < 1e-12);
        assert!(log2.value(0.0).is_nan());
        assert!(log2.value(-1.0).is_nan());
        assert!((LogCurve::natural().value(std::f64::consts::E) - 1.0).abs() < 1e-12);
        assert_eq!(log2.min_x(), 0.0);
        assert_eq!(log2.max_x(), f64::INFINITY);
    }
}
