use crate::update::UpdateRule;
use serde::{Deserialize, Serialize};

/// Physical constants and control knobs of a Monte Carlo run.
///
/// `temperature` or `field` is advanced by the sweep driver between sweep
/// points; everything else stays fixed for the duration of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Coupling constant J
    pub coupling: f64,
    /// External magnetic field h
    pub field: f64,
    /// Temperature T
    pub temperature: f64,
    /// Boltzmann constant (normalized to 1 by default)
    pub k_b: f64,
    /// Maximum number of steps per equilibration attempt
    pub epoch_threshold: usize,
    /// Number of steps between two equilibrium checks
    pub jump_size: usize,
    /// Relative energy change below which a check counts as stable
    pub relative_variation: f64,
    /// Sampling window length, as a multiple of the equilibration length
    pub data_record_duration: f64,
    /// Monte Carlo move applied at every step
    pub update_rule: UpdateRule,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            coupling: 1.0,
            field: 0.0,
            temperature: 2.5,
            k_b: 1.0,
            epoch_threshold: 10_000_000,
            jump_size: 50_000,
            relative_variation: 2e-4,
            data_record_duration: 1.0,
            update_rule: UpdateRule::Metropolis,
        }
    }
}

impl Parameters {
    /// Inverse thermal energy 1 / (k_B T)
    #[inline]
    pub fn beta(&self) -> f64 {
        1.0 / (self.k_b * self.temperature)
    }

    /// Probability that a same-spin neighbor joins a Wolff cluster
    #[inline]
    pub fn bond_probability(&self) -> f64 {
        1.0 - (-2.0 * self.coupling * self.beta()).exp()
    }

    pub fn with_update_rule(mut self, rule: UpdateRule) -> Self {
        self.update_rule = rule;
        self
    }
}
