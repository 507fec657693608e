use serde::Deserialize;
use thiserror::Error;

use crate::math::curve::tabulatedcurve::tabulatedcurveerror::TabulatedCurveError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("key '{0}' not found")]
    NameNotFoundError(String),

    #[error("invalid definition for '{name}': {source}")]
    CurveDefinitionError {
        name: String,
        #[source]
        source: TabulatedCurveError
    }
}

impl ManagerError {
    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }

    pub fn curve_definition(name: &str, source: TabulatedCurveError) -> ManagerError {
        ManagerError::CurveDefinitionError { name: name.to_owned(), source }
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
where
    T: for<'a> Deserialize<'a>
{
    Ok(serde_json::from_value(json_value)?)
}
