//! Equilibrium detection over the tracked energy signal.
//!
//! Every `jump_size` steps the detector compares the current energy to the
//! energy seen at the previous checkpoint. Two consecutive stable checkpoints
//! are required; a failing checkpoint clears a pending confirmation. After
//! `epoch_threshold` steps the detector gives up without having seen
//! equilibrium, which callers treat as a soft timeout rather than an error.

use crate::params::Parameters;

/// How an equilibration attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equilibration {
    /// Two consecutive checkpoints were below the relative variation
    Reached { steps: usize },
    /// `epoch_threshold` steps elapsed first
    TimedOut { steps: usize },
}

impl Equilibration {
    /// Number of Monte Carlo steps actually taken
    pub fn steps(&self) -> usize {
        match *self {
            Equilibration::Reached { steps } | Equilibration::TimedOut { steps } => steps,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Equilibration::Reached { .. })
    }
}

/// Result of polling the detector before a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Take one more step, then poll again
    Continue,
    Done(Equilibration),
}

#[derive(Debug, Clone)]
pub struct EquilibriumDetector {
    epoch_threshold: usize,
    jump_size: usize,
    relative_variation: f64,
    /// First stable checkpoint seen, waiting for a second one
    confirmed: bool,
    previous_energy: f64,
    steps: usize,
}

impl EquilibriumDetector {
    pub fn new(params: &Parameters, initial_energy: f64) -> Self {
        assert!(params.jump_size > 0, "jump_size must be positive");

        Self {
            epoch_threshold: params.epoch_threshold,
            jump_size: params.jump_size,
            relative_variation: params.relative_variation,
            confirmed: false,
            previous_energy: initial_energy,
            steps: 0,
        }
    }

    /// Steps granted so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Feed the current tracked energy.
    ///
    /// Returns [`Poll::Continue`] when the caller should perform one more step
    /// (the step is counted immediately), or the final verdict.
    pub fn poll(&mut self, energy: f64) -> Poll {
        if self.steps >= self.epoch_threshold {
            return Poll::Done(Equilibration::TimedOut { steps: self.steps });
        }

        if self.steps % self.jump_size == 0 {
            let stable = relative_change(self.previous_energy, energy) < self.relative_variation;
            self.previous_energy = energy;

            match (stable, self.confirmed) {
                (true, false) => self.confirmed = true,
                (true, true) => {
                    return Poll::Done(Equilibration::Reached { steps: self.steps });
                }
                (false, true) => self.confirmed = false,
                (false, false) => {}
            }
        }

        self.steps += 1;
        Poll::Continue
    }
}

/// |E_new - E_old| / |E_new|, with 0 / 0 read as no change
pub fn relative_change(old: f64, new: f64) -> f64 {
    let diff = (new - old).abs();
    if new == 0.0 {
        if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        diff / new.abs()
    }
}
