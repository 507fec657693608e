/// Absolute tolerance, dominant near zero.
pub const ABSOLUTE_EPS: f64 = 1e-10;

/// Relative tolerance, dominant at large magnitudes.
pub const RELATIVE_EPS: f64 = 1e-12;

// ─────────────────────────────────────────────────────────────────────────────
// 容差比較
// ─────────────────────────────────────────────────────────────────────────────
//
// 兩數相等 iff
//   |a - b| <= ABSOLUTE_EPS  或  |a - b| <= RELATIVE_EPS · max(|a|, |b|)
//
// NaN 與任何值（包括自身）皆不相等；無窮大只與自身相等。

pub fn equals(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a == b {
        return true;
    }
    // inf - x is inf and would pass the relative test below
    if a.is_infinite() || b.is_infinite() {
        return false;
    }

    let diff = (a - b).abs();
    if diff <= ABSOLUTE_EPS {
        return true;
    }

    let magnitude = a.abs().max(b.abs());
    diff <= ABSOLUTE_EPS.max(magnitude * RELATIVE_EPS)
}

#[inline]
pub fn less(a: f64, b: f64) -> bool {
    a < b && !equals(a, b)
}

#[inline]
pub fn less_or_equals(a: f64, b: f64) -> bool {
    a < b || equals(a, b)
}

#[inline]
pub fn greater(a: f64, b: f64) -> bool {
    a > b && !equals(a, b)
}

#[inline]
pub fn greater_or_equals(a: f64, b: f64) -> bool {
    a > b || equals(a, b)
}

#[inline]
pub fn is_zero(a: f64) -> bool {
    equals(a, 0.0)
}
