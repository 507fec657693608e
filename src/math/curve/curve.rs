
/// A real function of one variable defined on `[min_x, max_x]`.
///
/// Read-only contract shared by tabulated curves and every curve built on
/// top of them (power, scale, shift, logarithm).
pub trait Curve {
    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;

    /// NaN outside the domain.
    fn value(&self, x: f64) -> f64;
}

impl<C: Curve + ?Sized> Curve for &C {
    fn min_x(&self) -> f64 {
        (**self).min_x()
    }

    fn max_x(&self) -> f64 {
        (**self).max_x()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}

impl<C: Curve + ?Sized> Curve for Box<C> {
    fn min_x(&self) -> f64 {
        (**self).min_x()
    }

    fn max_x(&self) -> f64 {
        (**self).max_x()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}
