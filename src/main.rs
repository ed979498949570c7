//! Entry point for the ClimComp application.
//! Parses arguments into a validated configuration and runs the climatology pipeline.

use clap::Parser;
use clim_comp::cli::Args;
use clim_comp::parallel::ParallelConfig;
use clim_comp::{logging, pipeline};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> clim_comp::Result<()> {
    // Validate before touching the file system
    let config = args.to_config()?;

    args.threads
        .map_or_else(ParallelConfig::default, ParallelConfig::with_threads)
        .setup_global_pool()?;

    let report = pipeline::run(&config)?;
    println!(
        "✅ Saved {} and {}",
        report.climatology_path.display(),
        report.summary_path.display()
    );

    Ok(())
}
