//! Temperature and field sweeps.
//!
//! Each sweep point runs the selected update rule until the equilibrium
//! detector answers, then keeps running the same rule for a sampling window of
//! `data_record_duration × equilibration steps`, accumulating observables at
//! every single step from the incrementally tracked energy and magnetization.

use crate::equilibrium::{Equilibration, EquilibriumDetector, Poll};
use crate::lattice::Lattice;
use crate::model::{total_energy, total_magnetization};
use crate::observables::{Accumulator, Properties};
use crate::params::Parameters;
use crate::sinks::{LatticeRenderer, NullRenderer};
use crate::update::{StepDelta, UpdateRule};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Energy and magnetization of the chain, kept up to date from step deltas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainState {
    /// Total energy
    pub energy: f64,
    /// Magnetization per site
    pub magnetization: f64,
}

impl ChainState {
    /// Full O(N) measurement, used once to anchor the tracking
    pub fn measure(lat: &Lattice, params: &Parameters) -> Self {
        Self {
            energy: total_energy(lat, params.coupling, params.field),
            magnetization: total_magnetization(lat),
        }
    }

    #[inline]
    pub fn apply(&mut self, delta: StepDelta) {
        self.energy += delta.energy;
        self.magnetization += delta.magnetization;
    }
}

/// When the driver hands lattice snapshots to its renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    #[default]
    Off,
    /// Once per sweep point, after sampling
    SweepPoints,
    /// At every equilibrium checkpoint and after each sweep point
    Checkpoints,
}

/// Which parameter a sweep advances between points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepVariable {
    Temperature,
    Field,
}

/// Drives update rules, equilibrium detection and sampling over a sweep.
///
/// The random source is injected so that runs can be reproduced from a seed.
pub struct SweepDriver<R: Rng, V: LatticeRenderer = NullRenderer> {
    rng: R,
    renderer: V,
    render_policy: RenderPolicy,
}

impl SweepDriver<StdRng> {
    /// Deterministic driver for a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        debug!("Seeding random generator with {}", seed);
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Driver seeded from the system clock; the seed is logged so the run can
    /// be replayed with [`SweepDriver::with_seed`]
    pub fn from_time_seed() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        info!("Seeding random generator from clock: seed = {}", seed);
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SweepDriver<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            renderer: NullRenderer,
            render_policy: RenderPolicy::Off,
        }
    }
}

impl<R: Rng, V: LatticeRenderer> SweepDriver<R, V> {
    /// Replace the renderer and the policy deciding when it is called
    pub fn with_renderer<W: LatticeRenderer>(
        self,
        renderer: W,
        policy: RenderPolicy,
    ) -> SweepDriver<R, W> {
        SweepDriver {
            rng: self.rng,
            renderer,
            render_policy: policy,
        }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    fn render(&mut self, lat: &Lattice) {
        let grid = lat.to_grid();
        self.renderer.render_lattice(&grid, lat.size_x(), lat.size_y());
    }

    /// Apply one step of the configured update rule and track its deltas
    #[inline]
    pub fn step(&mut self, lat: &mut Lattice, params: &Parameters, state: &mut ChainState) {
        let delta = params.update_rule.step(lat, params, &mut self.rng);
        state.apply(delta);
    }

    /// Run the update rule until equilibrium is confirmed or
    /// `epoch_threshold` steps have elapsed
    pub fn reach_equilibrium(
        &mut self,
        lat: &mut Lattice,
        params: &Parameters,
        state: &mut ChainState,
    ) -> Equilibration {
        let mut detector = EquilibriumDetector::new(params, state.energy);

        loop {
            if self.render_policy == RenderPolicy::Checkpoints
                && detector.steps() % params.jump_size == 0
            {
                self.render(lat);
            }

            match detector.poll(state.energy) {
                Poll::Continue => self.step(lat, params, state),
                Poll::Done(outcome) => {
                    match outcome {
                        Equilibration::Reached { steps } => {
                            info!("Equilibrium state found after {} steps", steps)
                        }
                        Equilibration::TimedOut { steps } => info!(
                            "No equilibrium after {} steps (epoch threshold), sampling anyway",
                            steps
                        ),
                    }
                    return outcome;
                }
            }
        }
    }

    /// Run `window` more steps, accumulating observables before every step
    pub fn sample(
        &mut self,
        lat: &mut Lattice,
        params: &Parameters,
        state: &mut ChainState,
        window: usize,
    ) -> Accumulator {
        let n_sites = lat.size_xy();
        let mut acc = Accumulator::new();

        for _ in 0..window {
            acc.push(state.energy / n_sites, state.magnetization);
            self.step(lat, params, state);
        }

        acc
    }

    /// Sweep the temperature from `min(t_start, t_end)` upwards over
    /// `points` evenly spaced values.
    ///
    /// # Panics
    ///
    /// Panics when `points < 2`.
    pub fn thermalize_lattice(
        &mut self,
        lat: &mut Lattice,
        params: &mut Parameters,
        t_start: f64,
        t_end: f64,
        points: usize,
    ) -> Vec<Properties> {
        self.run_sweep(lat, params, SweepVariable::Temperature, t_start, t_end, points)
    }

    /// Sweep the external field from `min(h_start, h_end)` upwards over
    /// `points` evenly spaced values, temperature held fixed.
    ///
    /// # Panics
    ///
    /// Panics when `points < 2`, or when the Wolff rule would see a nonzero
    /// field.
    pub fn magnetize_lattice(
        &mut self,
        lat: &mut Lattice,
        params: &mut Parameters,
        h_start: f64,
        h_end: f64,
        points: usize,
    ) -> Vec<Properties> {
        assert!(
            params.update_rule != UpdateRule::Wolff || (h_start == 0.0 && h_end == 0.0),
            "Wolff update cannot be used for a field sweep over [{}, {}]",
            h_start,
            h_end
        );
        self.run_sweep(lat, params, SweepVariable::Field, h_start, h_end, points)
    }

    /// Shared driver of both sweep kinds
    pub fn run_sweep(
        &mut self,
        lat: &mut Lattice,
        params: &mut Parameters,
        variable: SweepVariable,
        start: f64,
        end: f64,
        points: usize,
    ) -> Vec<Properties> {
        assert!(points >= 2, "a sweep needs at least 2 sampling points, got {}", points);

        let low = start.min(end);
        let increment = (end - start).abs() / (points - 1) as f64;

        let mut state = ChainState::measure(lat, params);

        let mut records = Vec::with_capacity(points);
        for i in 0..points {
            let value = low + i as f64 * increment;
            set_sweep_value(variable, params, &mut state, lat, value);

            match variable {
                SweepVariable::Temperature => {
                    info!("[{}/{}] T = {:.4}", i + 1, points, params.temperature)
                }
                SweepVariable::Field => info!("[{}/{}] h = {:.4}", i + 1, points, params.field),
            }

            let equilibration = self.reach_equilibrium(lat, params, &mut state);
            let window = sample_window(params.data_record_duration, equilibration.steps());
            debug!("Sampling {} steps", window);

            let acc = self.sample(lat, params, &mut state, window);
            records.push(acc.finish(params.temperature, params.field, equilibration.is_reached()));

            if self.render_policy != RenderPolicy::Off {
                self.render(lat);
            }
        }

        records
    }
}

/// Move the swept parameter to `value`, keeping the tracked energy consistent
/// with the new Hamiltonian
fn set_sweep_value(
    variable: SweepVariable,
    params: &mut Parameters,
    state: &mut ChainState,
    lat: &Lattice,
    value: f64,
) {
    match variable {
        SweepVariable::Temperature => params.temperature = value,
        SweepVariable::Field => {
            // field term is -h Σ s_i = -h M N
            state.energy -= (value - params.field) * state.magnetization * lat.size_xy();
            params.field = value;
        }
    }
}

/// Sampling window length, never shorter than one step
pub fn sample_window(data_record_duration: f64, equilibration_steps: usize) -> usize {
    let steps = (data_record_duration * equilibration_steps as f64).round();
    if steps.is_finite() && steps >= 1.0 {
        steps as usize
    } else {
        1
    }
}
