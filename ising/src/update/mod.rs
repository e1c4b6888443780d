//! Monte Carlo moves.
//!
//! A move mutates the lattice in place and reports the realized change of
//! energy and magnetization so callers never have to recompute the globals.

mod metropolis;
mod wolff;

pub use metropolis::metropolis_step;
pub use wolff::{wolff_step, ClusterFlip};

use crate::lattice::Lattice;
use crate::params::Parameters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Realized (ΔE, ΔM) of one Monte Carlo step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepDelta {
    pub energy: f64,
    pub magnetization: f64,
}

impl StepDelta {
    pub const ZERO: StepDelta = StepDelta {
        energy: 0.0,
        magnetization: 0.0,
    };
}

/// Update rule applied at every step of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateRule {
    /// Single-site flip with Metropolis acceptance
    Metropolis,
    /// Cluster flip; only valid for zero external field
    Wolff,
}

impl UpdateRule {
    /// Apply one step of this rule to `lat`
    pub fn step<R: Rng + ?Sized>(
        &self,
        lat: &mut Lattice,
        params: &Parameters,
        rng: &mut R,
    ) -> StepDelta {
        match self {
            UpdateRule::Metropolis => metropolis_step(lat, params, rng),
            UpdateRule::Wolff => wolff_step(lat, params, rng).delta,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpdateRule::Metropolis => "metropolis",
            UpdateRule::Wolff => "wolff",
        }
    }
}

impl fmt::Display for UpdateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for UpdateRule {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "metropolis" => Ok(Self::Metropolis),
            "wolff" => Ok(Self::Wolff),
            _ => Err(format!(
                "unknown update rule '{s}', expected 'metropolis' or 'wolff'"
            )),
        }
    }
}
