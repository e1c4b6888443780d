//! Configuration management for Ising sweeps
//!
//! This module handles configuration structures, defaults, and validation
//! for temperature and field sweeps.

mod args;

pub use args::Args;

use ising::{Parameters, UpdateRule};
use serde::{Deserialize, Serialize};

/// Main configuration structure for a sweep
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub lattice: LatticeParams,
    pub simulation: SimulationParams,
    pub sweep: SweepParams,
    pub output: Option<OutputParams>,
}

/// Lattice geometry and initial spin state
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatticeParams {
    pub size_x: usize,
    /// 1 for a chain; defaults to `size_x` (square lattice)
    pub size_y: Option<usize>,
    pub initial: Option<InitialState>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InitialState {
    /// Every spin set to `spin`
    Uniform { spin: i8 },
    /// Each spin up with probability `p`
    Random { p: f64 },
}

/// Physical constants and Monte Carlo control knobs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationParams {
    pub coupling: Option<f64>,
    pub field: Option<f64>,
    pub temperature: Option<f64>,
    pub k_b: Option<f64>,
    pub epoch_threshold: Option<usize>,
    pub jump_size: Option<usize>,
    pub relative_variation: Option<f64>,
    pub data_record_duration: Option<f64>,
    pub algorithm: Option<UpdateRule>,
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let defaults = Parameters::default();
        SimulationParams {
            coupling: Some(defaults.coupling),
            field: Some(defaults.field),
            temperature: Some(defaults.temperature),
            k_b: Some(defaults.k_b),
            epoch_threshold: Some(defaults.epoch_threshold),
            jump_size: Some(defaults.jump_size),
            relative_variation: Some(defaults.relative_variation),
            data_record_duration: Some(defaults.data_record_duration),
            algorithm: Some(defaults.update_rule),
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        self.coupling = self.coupling.or(defaults.coupling);
        self.field = self.field.or(defaults.field);
        self.temperature = self.temperature.or(defaults.temperature);
        self.k_b = self.k_b.or(defaults.k_b);
        self.epoch_threshold = self.epoch_threshold.or(defaults.epoch_threshold);
        self.jump_size = self.jump_size.or(defaults.jump_size);
        self.relative_variation = self.relative_variation.or(defaults.relative_variation);
        self.data_record_duration = self.data_record_duration.or(defaults.data_record_duration);
        self.algorithm = self.algorithm.or(defaults.algorithm);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepKind {
    Temperature,
    Field,
}

/// Swept parameter and its range
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepParams {
    pub kind: SweepKind,
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

/// Where and how results are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputParams {
    pub directory: Option<String>,
    pub delimiter: Option<String>,
    pub render_lattice: Option<bool>,
}

impl Default for OutputParams {
    fn default() -> Self {
        OutputParams {
            directory: Some("results".to_string()),
            delimiter: Some(";".to_string()),
            render_lattice: Some(false),
        }
    }
}

impl OutputParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.directory.is_none() {
            self.directory = defaults.directory;
        }
        if self.delimiter.is_none() {
            self.delimiter = defaults.delimiter;
        }
        if self.render_lattice.is_none() {
            self.render_lattice = defaults.render_lattice;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        if self.lattice.size_y.is_none() {
            self.lattice.size_y = Some(self.lattice.size_x);
        }
        if self.lattice.initial.is_none() {
            self.lattice.initial = Some(InitialState::Uniform { spin: 1 });
        }
        self.simulation = self.simulation.with_defaults();
        self.output = Some(self.output.take().unwrap_or_default().with_defaults());
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.lattice.size_x == 0 || self.size_y() == 0 {
            return Err("Lattice dimensions must be positive".to_string());
        }

        match self.lattice.initial {
            Some(InitialState::Uniform { spin }) if spin != 1 && spin != -1 => {
                return Err(format!("Uniform spin must be +1 or -1, got {}", spin));
            }
            Some(InitialState::Random { p }) if !(0.0..=1.0).contains(&p) => {
                return Err(format!("Up-spin probability must lie in [0, 1], got {}", p));
            }
            _ => {}
        }

        let params = self.parameters();
        if params.k_b <= 0.0 {
            return Err("Boltzmann constant must be positive".to_string());
        }
        if params.jump_size == 0 {
            return Err("jump_size must be positive".to_string());
        }
        if params.relative_variation < 0.0 {
            return Err("relative_variation must not be negative".to_string());
        }
        if params.data_record_duration < 0.0 {
            return Err("data_record_duration must not be negative".to_string());
        }

        if self.sweep.points < 2 {
            return Err(format!(
                "A sweep needs at least 2 points, got {}",
                self.sweep.points
            ));
        }

        match self.sweep.kind {
            SweepKind::Temperature => {
                if self.sweep.start.min(self.sweep.end) <= 0.0 {
                    return Err("Swept temperatures must be positive".to_string());
                }
                if params.update_rule == UpdateRule::Wolff && params.field != 0.0 {
                    return Err("The Wolff algorithm requires a zero external field".to_string());
                }
            }
            SweepKind::Field => {
                if params.temperature <= 0.0 {
                    return Err("Temperature must be positive".to_string());
                }
                if params.update_rule == UpdateRule::Wolff {
                    return Err("The Wolff algorithm cannot be used for a field sweep".to_string());
                }
            }
        }

        if self.delimiter().is_empty() {
            return Err("Output delimiter must not be empty".to_string());
        }

        Ok(())
    }

    pub fn size_y(&self) -> usize {
        self.lattice.size_y.unwrap_or(self.lattice.size_x)
    }

    /// Simulation parameters handed to the sweep driver
    pub fn parameters(&self) -> Parameters {
        let defaults = Parameters::default();
        let sim = &self.simulation;
        Parameters {
            coupling: sim.coupling.unwrap_or(defaults.coupling),
            field: sim.field.unwrap_or(defaults.field),
            temperature: sim.temperature.unwrap_or(defaults.temperature),
            k_b: sim.k_b.unwrap_or(defaults.k_b),
            epoch_threshold: sim.epoch_threshold.unwrap_or(defaults.epoch_threshold),
            jump_size: sim.jump_size.unwrap_or(defaults.jump_size),
            relative_variation: sim.relative_variation.unwrap_or(defaults.relative_variation),
            data_record_duration: sim
                .data_record_duration
                .unwrap_or(defaults.data_record_duration),
            update_rule: sim.algorithm.unwrap_or(defaults.update_rule),
        }
    }

    pub fn results_dir(&self) -> String {
        self.output
            .as_ref()
            .and_then(|o| o.directory.clone())
            .unwrap_or_else(|| "results".to_string())
    }

    pub fn delimiter(&self) -> String {
        self.output
            .as_ref()
            .and_then(|o| o.delimiter.clone())
            .unwrap_or_else(|| ";".to_string())
    }

    pub fn is_render_enabled(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.render_lattice)
            .unwrap_or(false)
    }
}
