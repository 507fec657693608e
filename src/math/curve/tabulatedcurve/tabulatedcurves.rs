use std::io::{
    BufRead,
    BufReader,
    BufWriter,
    Read,
    Write
};

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;
use tracing::debug;

use crate::math::curve::curve::Curve;
use crate::math::curve::tabulatedcurve::arraytabulatedcurve::ArrayTabulatedCurve;
use crate::math::curve::tabulatedcurve::point2d::{
    format_coordinate,
    Point2D
};
use crate::math::curve::tabulatedcurve::tabulatedcurve::{
    TabulatedCurve,
    MIN_POINTS_COUNT
};
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::{
    TabulatedCurveError,
    TabulatedCurveResult
};
use crate::math::tolerance::ABSOLUTE_EPS;

#[derive(Debug, Error)]
pub enum TabulatedCurveIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid format: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Curve(#[from] TabulatedCurveError)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tabulation
// ─────────────────────────────────────────────────────────────────────────────

/// Samples `curve` at `points_count` evenly spaced x on `[left_x, right_x]`.
///
/// The interval may exceed the curve's domain by at most `ABSOLUTE_EPS` on
/// either side.
pub fn tabulate<C>(curve: &C,
                   left_x: f64,
                   right_x: f64,
                   points_count: usize) -> TabulatedCurveResult<ArrayTabulatedCurve>
where
    C: Curve + ?Sized
{
    if left_x < curve.min_x() - ABSOLUTE_EPS || right_x > curve.max_x() + ABSOLUTE_EPS {
        return Err(TabulatedCurveError::invalid_construction(
            format!("tabulation bounds [{}, {}] exceed the curve domain [{}, {}]",
                    left_x, right_x, curve.min_x(), curve.max_x())
        ));
    }
    if points_count < MIN_POINTS_COUNT {
        return Err(TabulatedCurveError::invalid_construction(
            format!("at least {} points required, {} given", MIN_POINTS_COUNT, points_count)
        ));
    }

    let step = (right_x - left_x) / (points_count - 1) as f64;
    let values: Vec<f64> = (0..points_count)
        .map(|i| curve.value(left_x + i as f64 * step))
        .collect();
    ArrayTabulatedCurve::from_values(left_x, right_x, &values)
}

// ─────────────────────────────────────────────────────────────────────────────
// Binary format: big-endian i32 count, then (x, y) as big-endian f64 pairs
// ─────────────────────────────────────────────────────────────────────────────

pub fn output_tabulated_curve<W>(curve: &dyn TabulatedCurve, out: W) -> Result<(), TabulatedCurveIoError>
where
    W: Write
{
    let count = curve.points_count();
    let count_field = i32::try_from(count)
        .map_err(|_| TabulatedCurveIoError::Format(format!("{} points do not fit the count field", count)))?;

    let mut writer = BufWriter::new(out);
    writer.write_all(&count_field.to_be_bytes())?;
    for i in 0..count {
        writer.write_all(&curve.point_x(i)?.to_be_bytes())?;
        writer.write_all(&curve.point_y(i)?.to_be_bytes())?;
    }
    writer.flush()?;
    debug!(points_count = count, "binary curve written");
    Ok(())
}

pub fn input_tabulated_curve<R>(input: R) -> Result<ArrayTabulatedCurve, TabulatedCurveIoError>
where
    R: Read
{
    let mut reader = BufReader::new(input);
    let mut int_buf = [0u8; 4];
    reader.read_exact(&mut int_buf)?;
    let count_field = i32::from_be_bytes(int_buf);
    let count = usize::try_from(count_field)
        .map_err(|_| TabulatedCurveIoError::Format(format!("negative point count {}", count_field)))?;

    let mut points = Vec::with_capacity(count.min(1 << 16));
    for _ in 0..count {
        let x = read_f64(&mut reader)?;
        let y = read_f64(&mut reader)?;
        points.push(Point2D::new(x, y));
    }
    debug!(points_count = count, "binary curve read");
    Ok(ArrayTabulatedCurve::new(&points)?)
}

fn read_f64<R: Read>(reader: &mut R) -> std::io::Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_be_bytes(buf))
}

// ─────────────────────────────────────────────────────────────────────────────
// Text format: "count x0 y0 x1 y1 ..." on a single line
// ─────────────────────────────────────────────────────────────────────────────

pub fn write_tabulated_curve<W>(curve: &dyn TabulatedCurve, out: W) -> Result<(), TabulatedCurveIoError>
where
    W: Write
{
    let count = curve.points_count();
    let mut line = count.to_string();
    for i in 0..count {
        line.push(' ');
        line.push_str(&format_coordinate(curve.point_x(i)?));
        line.push(' ');
        line.push_str(&format_coordinate(curve.point_y(i)?));
    }

    let mut writer = BufWriter::new(out);
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

/// Reads one `count x0 y0 ...` record. A negative or non-integral count
/// (`2.5`) is a format error; `2.0` reads as 2.
pub fn read_tabulated_curve<R>(input: R) -> Result<ArrayTabulatedCurve, TabulatedCurveIoError>
where
    R: Read
{
    let mut text = String::new();
    BufReader::new(input).read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    let count_token = next_number(&mut tokens, "number of points")?;
    if count_token < 0.0 || count_token.fract() != 0.0 {
        return Err(TabulatedCurveIoError::Format(format!("invalid number of points {}", count_token)));
    }
    let count = count_token as usize;

    let mut points = Vec::with_capacity(count.min(1 << 16));
    for _ in 0..count {
        let x = next_number(&mut tokens, "x")?;
        let y = next_number(&mut tokens, "y")?;
        points.push(Point2D::new(x, y));
    }
    Ok(ArrayTabulatedCurve::new(&points)?)
}

fn next_number<'a, I>(tokens: &mut I, what: &str) -> Result<f64, TabulatedCurveIoError>
where
    I: Iterator<Item = &'a str>
{
    let token = tokens
        .next()
        .ok_or_else(|| TabulatedCurveIoError::Format(format!("expected {}", what)))?;
    parse_number(token)
        .ok_or_else(|| TabulatedCurveIoError::Format(format!("expected {}, found '{}'", what, token)))
}

fn parse_number(token: &str) -> Option<f64> {
    match token {
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => token.parse::<f64>().ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON
// ─────────────────────────────────────────────────────────────────────────────

/// Serializable snapshot of a tabulated curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabulatedCurveData {
    points: Vec<Point2D>
}

impl TabulatedCurveData {
    pub fn new(curve: &dyn TabulatedCurve) -> TabulatedCurveData {
        TabulatedCurveData { points: curve.points() }
    }

    pub fn points_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn to_array_curve(&self) -> TabulatedCurveResult<ArrayTabulatedCurve> {
        ArrayTabulatedCurve::new(&self.points)
    }
}

pub fn write_json<W>(curve: &dyn TabulatedCurve, out: W) -> Result<(), TabulatedCurveIoError>
where
    W: Write
{
    let mut writer = BufWriter::new(out);
    serde_json::to_writer(&mut writer, &TabulatedCurveData::new(curve))?;
    writer.flush()?;
    Ok(())
}

pub fn read_json<R>(input: R) -> Result<ArrayTabulatedCurve, TabulatedCurveIoError>
where
    R: Read
{
    let data: TabulatedCurveData = serde_json::from_reader(BufReader::new(input))?;
    Ok(data.to_array_curve()?)
}

/// Reads one text-format curve per non-empty line.
pub fn read_tabulated_curves<R>(input: R) -> Result<Vec<ArrayTabulatedCurve>, TabulatedCurveIoError>
where
    R: BufRead
{
    let mut curves = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        curves.push(read_tabulated_curve(line.as_bytes())?);
    }
    Ok(curves)
}
