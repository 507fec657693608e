use crate::math::curve::curve::Curve;
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::{
    TabulatedCurveError,
    TabulatedCurveResult
};

/// `scale_y * base(x / scale_x)`; the domain stretches by `scale_x`.
#[derive(Debug, Clone)]
pub struct ScaleCurve<C> {
    base: C,
    scale_x: f64,
    scale_y: f64
}

impl<C: Curve> ScaleCurve<C> {
    pub fn new(base: C, scale_x: f64, scale_y: f64) -> TabulatedCurveResult<ScaleCurve<C>> {
        if !(scale_x.abs() >= 1e-15) {
            return Err(TabulatedCurveError::invalid_construction(
                format!("x scale must be non-zero, got {}", scale_x)
            ));
        }
        Ok(ScaleCurve { base, scale_x, scale_y })
    }
}

impl<C: Curve> Curve for ScaleCurve<C> {
    fn min_x(&self) -> f64 {
        self.base.min_x() * self.scale_x
    }

    fn max_x(&self) -> f64 {
        self.base.max_x() * self.scale_x
    }

    fn value(&self, x: f64) -> f64 {
        self.scale_y * self.base.value(x / self.scale_x)
    }
}
