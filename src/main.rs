use std::path::{
    Path,
    PathBuf
};
use std::process::ExitCode;

use clap::Parser;
use tracing::{
    error,
    info
};
use tracing_subscriber::{
    fmt,
    prelude::*
};

use tabcurve::configuration::Configuration;
use tabcurve::manager::manager::IManager;
use tabcurve::manager::managererror::ManagerError;
use tabcurve::math::curve::tabulatedcurve::arraytabulatedcurve::ArrayTabulatedCurve;
use tabcurve::math::curve::tabulatedcurve::linkedlisttabulatedcurve::LinkedListTabulatedCurve;
use tabcurve::math::curve::tabulatedcurve::point2d::Point2D;
use tabcurve::math::curve::tabulatedcurve::tabulatedcurve::TabulatedCurve;
use tabcurve::math::curve::tabulatedcurve::tabulatedcurveerror::TabulatedCurveError;

#[derive(Parser)]
#[command(name = "tabcurve")]
#[command(about = "Tabulated curve demo", long_about = None)]
struct Cli {
    /// JSON configuration with a "tabulated_curve" array
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Curve from the configuration to print; repeatable
    #[arg(long = "curve", value_name = "NAME")]
    curves: Vec<String>
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing::level_filters::LevelFilter::INFO)
        .with(fmt::layer()
            .without_time()
            .with_target(false))
        .init();
}

fn demo() -> Result<(), TabulatedCurveError> {
    let points = [
        Point2D::new(0.0, 1.2),
        Point2D::new(1.0, 3.8),
        Point2D::new(2.0, 15.2)
    ];
    let mut array = ArrayTabulatedCurve::new(&points)?;
    let mut list = LinkedListTabulatedCurve::new(&points)?;
    info!("array:  {}", array);
    info!("linked: {}", list);

    let array_clone = array.clone();
    let list_clone = list.clone();
    info!("array == array clone: {}", array == array_clone);
    info!("linked == linked clone: {}", list == list_clone);
    info!("array == linked: {}", array == list);
    info!("linked == array: {}", list == array);

    let array_hash = array.hash_code();
    let list_hash = list.hash_code();
    info!("hash before: array {:#x}, linked {:#x}", array_hash, list_hash);

    array.set_point_y(0, array.point_y(0)? + 0.005)?;
    list.set_point_y(0, list.point_y(0)? + 0.005)?;
    info!("array after:  {} (clone {})", array, array_clone);
    info!("linked after: {} (clone {})", list, list_clone);
    info!("hash after: array {:#x}, linked {:#x}", array.hash_code(), list.hash_code());
    info!("value(0.5) = {}", array.function_value(0.5));
    Ok(())
}

fn print_configured(config_path: &Path, names: &[String]) -> Result<(), ManagerError> {
    let config = Configuration::new();
    config.from_reader(config_path)?;
    let manager = config.tabulated_curve_manager();
    let names = if names.is_empty() { manager.names() } else { names.to_vec() };
    for name in names {
        let curve = manager.get(&name)?;
        let mid = match (curve.left_domain_border(), curve.right_domain_border()) {
            (Ok(left), Ok(right)) => (left + right) / 2.0,
            _ => f64::NAN
        };
        info!("{}: {} value({}) = {}", name, curve, mid, curve.function_value(mid));
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = demo() {
        error!("demo failed: {}", err);
        return ExitCode::FAILURE;
    }
    if let Some(config_path) = &cli.config {
        if let Err(err) = print_configured(config_path, &cli.curves) {
            error!("configuration failed: {}", err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
