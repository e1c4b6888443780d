//! Markov-chain Monte Carlo simulation of the 2D Ising model.
//!
//! The crate is organised bottom-up: [`lattice`] owns the spins, [`model`]
//! computes energies and flip deltas, [`update`] implements the Metropolis
//! and Wolff moves, [`equilibrium`] decides when a chain has settled and
//! [`sweep`] drives temperature/field sweeps into [`observables`].

pub mod equilibrium;
pub mod lattice;
pub mod model;
pub mod observables;
pub mod params;
pub mod sinks;
pub mod sweep;
pub mod update;

pub use equilibrium::{Equilibration, EquilibriumDetector};
pub use lattice::{Lattice, Site, DOWN, UP};
pub use observables::{critical_temperature, Accumulator, Properties};
pub use params::Parameters;
pub use sinks::{LatticeRenderer, NullRenderer, SeriesExporter};
pub use sweep::{ChainState, RenderPolicy, SweepDriver, SweepVariable};
pub use update::{ClusterFlip, StepDelta, UpdateRule};

#[cfg(test)]
mod tests;
