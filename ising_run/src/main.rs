//! Ising Sweep Command-Line Interface
//!
//! Entry point for temperature and field sweeps of the 2D Ising model with
//! YAML configuration.

mod app;
mod config;
mod io;

use app::IsingApplication;
use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    IsingApplication::from_cli()?.run()
}
