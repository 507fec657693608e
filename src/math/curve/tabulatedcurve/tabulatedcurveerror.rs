use thiserror::Error;

pub type TabulatedCurveResult<T> = Result<T, TabulatedCurveError>;

/// Failures of the tabulated curve contract. None are recovered internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TabulatedCurveError {
    /// Bad bounds, fewer than two samples, or samples not strictly ascending.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("index {index} out of range for {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    /// `lower`/`upper` are the neighbouring x values, infinite when the
    /// neighbour does not exist.
    #[error("x = {x} must lie strictly between {lower} and {upper}")]
    OrderingViolation { x: f64, lower: f64, upper: f64 },

    #[error("point with x = {0} already exists")]
    DuplicatePoint(f64),

    #[error("cannot delete from a curve of {count} points: at least 2 must remain")]
    InvariantViolation { count: usize },

    #[error("curve holds no points")]
    EmptyState
}

impl TabulatedCurveError {
    pub fn invalid_construction(reason: impl Into<String>) -> TabulatedCurveError {
        TabulatedCurveError::InvalidConstruction(reason.into())
    }
}
