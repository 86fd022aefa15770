//! Command-line interface for ClashSim
//!
//! Runs a headless CPU-vs-CPU match, optionally overriding the config file.

use clap::Parser;
use std::path::PathBuf;

/// Two-team lane autobattler simulator
#[derive(Parser, Debug)]
#[command(name = "clashsim")]
#[command(about = "Two-team lane autobattler simulator")]
#[command(version)]
pub struct Args {
    /// Run the match described by this JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for match log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum match duration in seconds
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// Random seed for a reproducible match
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
