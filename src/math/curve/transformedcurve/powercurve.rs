use crate::math::curve::curve::Curve;

/// `base(x)^power` over the domain of `base`.
#[derive(Debug, Clone)]
pub struct PowerCurve<C> {
    base: C,
    power: f64
}

impl<C: Curve> PowerCurve<C> {
    pub fn new(base: C, power: f64) -> PowerCurve<C> {
        PowerCurve { base, power }
    }
}

impl<C: Curve> Curve for PowerCurve<C> {
    fn min_x(&self) -> f64 {
        self.base.min_x()
    }

    fn max_x(&self) -> f64 {
        self.base.max_x()
    }

    fn value(&self, x: f64) -> f64 {
        self.base.value(x).powf(self.power)
    }
}
