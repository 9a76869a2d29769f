use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mps_bench_core::{
    generate_field, write_document, BenchResult, Environment, FieldParams, SolverConditions,
};

/// Initial-condition generator for the dam-break benchmark.
///
/// The defaults are the reference benchmark constants; running with no
/// arguments reproduces the published configuration.
#[derive(Parser, Debug)]
#[command(name = "bench-generate")]
#[command(about = "Generate the dam-break initial-condition document", long_about = None)]
struct Args {
    /// Fluid column width in grid cells
    #[arg(long, default_value_t = 50)]
    width: u32,

    /// Fluid column height in grid cells
    #[arg(long, default_value_t = 100)]
    height: u32,

    /// Reference particle spacing in meters
    #[arg(long, default_value_t = 1e-3)]
    spacing: f64,

    /// Output document path
    #[arg(short, long, default_value = "test.xml")]
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
    let params = FieldParams::new(args.width, args.height, args.spacing);
    let field = generate_field(&params)?;

    let condition = SolverConditions::default();
    let environment = Environment {
        l_0: args.spacing,
        ..Environment::default()
    };

    write_document(&args.output, &condition, &environment, &field)?;
    println!(
        "wrote {} particles to {}",
        field.len(),
        args.output.display()
    );
    Ok(())
}
