//! ClashSim - Two-Team Lane Autobattler
//!
//! Runs a CPU-vs-CPU match headlessly and writes the combat log.

use std::process::ExitCode;

use clashsim::cli;
use clashsim::headless::{run_headless_match, HeadlessMatchConfig};

fn main() -> ExitCode {
    let args = cli::parse_args();

    let config = match &args.headless {
        Some(path) => HeadlessMatchConfig::load_from_file(path),
        None => Ok(HeadlessMatchConfig::default()),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Command-line flags override the file
    if let Some(output) = &args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }

    match run_headless_match(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
