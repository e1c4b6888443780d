//! Input/Output operations for Ising sweeps
//!
//! This module handles logging setup and writing of sweep results and
//! lattice snapshots.

mod export;
mod output;

pub use export::{DelimitedExporter, GridFileRenderer};
pub use output::setup_output;
