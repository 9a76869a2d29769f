use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mps_bench_core::{load_reference_curves, BenchResult, Curve, CurveStyle, EdgePlot, EdgeSeries};

/// Leading-edge comparison for the dam-break benchmark.
///
/// Reduces every solver snapshot in a directory to the leading edge of the
/// collapsing column, non-dimensionalizes the series and overlays it on
/// the published curves.
#[derive(Parser, Debug)]
#[command(name = "bench-analyze")]
#[command(about = "Plot the dam-break leading edge against literature data", long_about = None)]
struct Args {
    /// Directory of solver snapshot files (filename order is chronological)
    snapshot_dir: PathBuf,

    /// Characteristic column length L in meters
    length: f64,

    /// Output interval between snapshots in seconds
    dt: f64,

    /// Gravitational acceleration in m/s^2
    gravity: f64,

    /// Directory holding the literature reference tables
    #[arg(long, default_value = ".")]
    reference_dir: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "edge.svg")]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> BenchResult<()> {
    let series = EdgeSeries::from_directory(&args.snapshot_dir, args.dt)?;
    let points = series.non_dimensionalize(args.length, args.gravity)?;

    let mut plot = EdgePlot::new();
    for curve in load_reference_curves(&args.reference_dir)? {
        plot.add_curve(curve);
    }
    plot.add_curve(Curve {
        label: "OpenMPS".to_string(),
        points,
        style: CurveStyle::Heavy,
        color: "red".to_string(),
    });

    plot.render(&args.output)?;
    println!(
        "plotted {} snapshots to {}",
        series.len(),
        args.output.display()
    );
    Ok(())
}
