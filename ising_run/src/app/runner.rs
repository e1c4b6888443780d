use crate::config::{Config, InitialState, SweepKind};
use crate::io::GridFileRenderer;
use ising::{Lattice, LatticeRenderer, Parameters, Properties, RenderPolicy, SweepDriver};
use rand::rngs::StdRng;
use tracing::info;

/// Outcome of a full sweep run
pub struct SweepRun {
    pub records: Vec<Properties>,
    pub lattice: Lattice,
    pub parameters: Parameters,
}

fn build_lattice(config: &Config) -> Lattice {
    Lattice::new(config.lattice.size_x, config.size_y())
}

fn build_driver(config: &Config) -> SweepDriver<StdRng> {
    match config.simulation.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            SweepDriver::with_seed(seed)
        }
        None => SweepDriver::from_time_seed(),
    }
}

/// Run the configured sweep, dumping lattice snapshots when requested
pub fn run_sweep(config: &Config) -> SweepRun {
    let driver = build_driver(config);

    if config.is_render_enabled() {
        let renderer = GridFileRenderer::new(config.results_dir());
        info!("Lattice snapshots written to {}", renderer.path().display());
        execute(config, driver.with_renderer(renderer, RenderPolicy::Checkpoints))
    } else {
        execute(config, driver)
    }
}

fn execute<V: LatticeRenderer>(config: &Config, mut driver: SweepDriver<StdRng, V>) -> SweepRun {
    let mut lattice = build_lattice(config);
    match config.lattice.initial {
        Some(InitialState::Random { p }) => lattice.randomize(p, driver.rng_mut()),
        Some(InitialState::Uniform { spin }) => lattice.uniform(spin),
        None => {}
    }

    let mut parameters = config.parameters();
    info!(
        "Lattice {}x{}, J = {}, k_B = {}, update rule: {}",
        lattice.size_x(),
        lattice.size_y(),
        parameters.coupling,
        parameters.k_b,
        parameters.update_rule
    );

    let sweep = &config.sweep;
    let records = match sweep.kind {
        SweepKind::Temperature => {
            info!(
                "Temperature sweep from {} to {} over {} points (h = {})",
                sweep.start, sweep.end, sweep.points, parameters.field
            );
            driver.thermalize_lattice(
                &mut lattice,
                &mut parameters,
                sweep.start,
                sweep.end,
                sweep.points,
            )
        }
        SweepKind::Field => {
            info!(
                "Field sweep from {} to {} over {} points (T = {})",
                sweep.start, sweep.end, sweep.points, parameters.temperature
            );
            driver.magnetize_lattice(
                &mut lattice,
                &mut parameters,
                sweep.start,
                sweep.end,
                sweep.points,
            )
        }
    };

    SweepRun {
        records,
        lattice,
        parameters,
    }
}
