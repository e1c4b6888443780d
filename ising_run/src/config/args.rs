//! Command-line argument parsing for Ising sweeps

use clap::Parser;

/// Monte Carlo sweep of the 2D Ising model with YAML configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "ising.yaml")]
    pub config_file: String,

    /// Write the log to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the directory receiving the exported series
    #[arg(long)]
    pub results_dir: Option<String>,

    /// Override the random seed (default: clock based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the update rule (metropolis or wolff)
    #[arg(long)]
    pub algorithm: Option<String>,

    /// Override the number of sweep points
    #[arg(long)]
    pub points: Option<usize>,

    /// Dump the spin lattice at every equilibrium checkpoint
    #[arg(long)]
    pub render: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
