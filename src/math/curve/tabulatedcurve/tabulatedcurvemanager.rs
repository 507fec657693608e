use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::{
    parse_json_value,
    ManagerError
};
use crate::math::curve::tabulatedcurve::point2d::Point2D;
use crate::math::curve::tabulatedcurve::tabulatedcurve::{
    TabulatedCurve,
    TabulatedCurveBackend
};
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::TabulatedCurveError;

// 三種定義方式擇一：
//   points                        明確的樣本點
//   left_x + right_x + values     等距網格，y 取 values
//   left_x + right_x + points_count  等距網格，y = 0

#[derive(Deserialize)]
struct TabulatedCurveJsonProp {
    name: String,
    backend: TabulatedCurveBackend,
    points: Option<Vec<Point2D>>,
    left_x: Option<f64>,
    right_x: Option<f64>,
    values: Option<Vec<f64>>,
    points_count: Option<usize>
}

fn get_tabulated_curve_from_json(json_value: serde_json::Value) -> Result<Box<dyn TabulatedCurve>, ManagerError> {
    let json_prop: TabulatedCurveJsonProp = parse_json_value(json_value)?;
    let backend = json_prop.backend;
    let curve_result = match (json_prop.points, json_prop.left_x, json_prop.right_x) {
        (Some(points), None, None) => backend.from_points(&points),
        (None, Some(left_x), Some(right_x)) => {
            match (json_prop.values, json_prop.points_count) {
                (Some(values), None) => backend.from_values(left_x, right_x, &values),
                (None, Some(points_count)) => backend.from_bounds(left_x, right_x, points_count),
                _ => Err(TabulatedCurveError::invalid_construction(
                    "grid definitions need exactly one of 'values' or 'points_count'"
                ))
            }
        },
        _ => Err(TabulatedCurveError::invalid_construction(
            "expected either 'points' or both 'left_x' and 'right_x'"
        ))
    };
    curve_result.map_err(|error| ManagerError::curve_definition(&json_prop.name, error))
}

pub fn new_tabulated_curve_manager() -> Manager<Box<dyn TabulatedCurve>> {
    Manager::new(get_tabulated_curve_from_json)
}
