use super::*;
use crate::model::{total_energy, total_magnetization};
use crate::sinks::SnapshotRecorder;
use approx::*;

fn quick_params(rule: UpdateRule) -> Parameters {
    Parameters {
        epoch_threshold: 2_000,
        jump_size: 100,
        relative_variation: 0.05,
        data_record_duration: 1.0,
        update_rule: rule,
        ..Parameters::default()
    }
}

#[test]
fn test_sweep_boundary_ascending() {
    let mut driver = SweepDriver::with_seed(1);
    let mut lat = Lattice::new(4, 4);
    let mut params = quick_params(UpdateRule::Metropolis);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 1.0, 2.0, 2);
    let temps: Vec<f64> = records.iter().map(|p| p.temperature).collect();
    assert_eq!(temps, vec![1.0, 2.0]);
}

#[test]
fn test_sweep_boundary_descending_starts_at_minimum() {
    let mut driver = SweepDriver::with_seed(2);
    let mut lat = Lattice::new(4, 4);
    let mut params = quick_params(UpdateRule::Metropolis);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 2.0, 1.0, 3);
    let temps: Vec<f64> = records.iter().map(|p| p.temperature).collect();
    assert_eq!(temps, vec![1.0, 1.5, 2.0]);
}

#[test]
#[should_panic(expected = "at least 2 sampling points")]
fn test_single_point_sweep_rejected() {
    let mut driver = SweepDriver::with_seed(3);
    let mut lat = Lattice::new(4, 4);
    let mut params = quick_params(UpdateRule::Metropolis);
    driver.thermalize_lattice(&mut lat, &mut params, 1.0, 2.0, 1);
}

#[test]
fn test_low_temperature_stays_ordered() {
    let mut driver = SweepDriver::with_seed(4);
    let mut lat = Lattice::new(8, 8);
    let mut params = quick_params(UpdateRule::Metropolis);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 0.5, 1.0, 2);

    // Ground state energy per site is -2J, nearly frozen at these temperatures
    assert_relative_eq!(records[0].energy, -2.0, epsilon = 1e-6);
    assert!(records[0].equilibrated);
    assert_eq!(records[0].steps, 100);
    assert!(records[1].energy < -1.9);
    assert!(records[1].magnetization_abs > 0.9);
}

#[test]
fn test_timeout_is_not_an_error() {
    let mut driver = SweepDriver::with_seed(5);
    let mut lat = Lattice::new(4, 4);
    let mut params = Parameters {
        relative_variation: 0.0,
        epoch_threshold: 300,
        ..quick_params(UpdateRule::Metropolis)
    };

    let records = driver.thermalize_lattice(&mut lat, &mut params, 1.5, 2.5, 2);
    for record in &records {
        assert!(!record.equilibrated);
        assert_eq!(record.steps, 300);
    }
}

#[test]
fn test_magnetization_bounds_over_sweep() {
    let mut driver = SweepDriver::with_seed(6);
    let mut lat = Lattice::new(6, 6);
    lat.randomize(0.5, driver.rng_mut());
    let mut params = quick_params(UpdateRule::Wolff);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 1.5, 3.5, 5);
    assert_eq!(records.len(), 5);
    for record in &records {
        assert!(record.magnetization.abs() <= 1.0);
        assert!(record.magnetization_abs >= 0.0 && record.magnetization_abs <= 1.0);
        assert!(record.magnetization_sq <= 1.0);
        assert!(record.energy >= -2.0 - 1e-9 && record.energy <= 2.0 + 1e-9);
        assert!(record.steps >= 1);
    }
}

#[test]
fn test_tracking_survives_equilibration_and_sampling() {
    let mut driver = SweepDriver::with_seed(7);
    let mut lat = Lattice::new(10, 10);
    lat.randomize(0.5, driver.rng_mut());

    for rule in [UpdateRule::Metropolis, UpdateRule::Wolff] {
        let params = Parameters {
            temperature: 2.3,
            ..quick_params(rule)
        };
        let mut state = ChainState::measure(&lat, &params);

        let outcome = driver.reach_equilibrium(&mut lat, &params, &mut state);
        driver.sample(&mut lat, &params, &mut state, outcome.steps().max(1));

        assert_relative_eq!(
            state.energy,
            total_energy(&lat, params.coupling, params.field),
            epsilon = 1e-8
        );
        assert_relative_eq!(state.magnetization, total_magnetization(&lat), epsilon = 1e-10);
    }
}

#[test]
fn test_field_sweep_aligns_spins() {
    let mut driver = SweepDriver::with_seed(8);
    let mut lat = Lattice::new(6, 6);
    lat.uniform(DOWN);
    let mut params = Parameters {
        temperature: 1.0,
        ..quick_params(UpdateRule::Metropolis)
    };

    let records = driver.magnetize_lattice(&mut lat, &mut params, 0.0, 1.0, 3);
    let fields: Vec<f64> = records.iter().map(|p| p.field).collect();
    assert_eq!(fields, vec![0.0, 0.5, 1.0]);
    assert!(records.iter().all(|p| p.temperature == 1.0));
    assert_eq!(params.field, 1.0);
}

#[test]
#[should_panic(expected = "field sweep")]
fn test_wolff_field_sweep_rejected() {
    let mut driver = SweepDriver::with_seed(9);
    let mut lat = Lattice::new(4, 4);
    let mut params = quick_params(UpdateRule::Wolff);
    driver.magnetize_lattice(&mut lat, &mut params, 0.0, 1.0, 2);
}

#[test]
fn test_renderer_receives_snapshots() {
    let mut driver = SweepDriver::with_seed(10)
        .with_renderer(SnapshotRecorder::default(), RenderPolicy::SweepPoints);
    let mut lat = Lattice::new(5, 3);
    let mut params = quick_params(UpdateRule::Metropolis);

    driver.thermalize_lattice(&mut lat, &mut params, 1.0, 2.0, 4);

    let frames = &driver.renderer().frames;
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0].nrows(), 3);
    assert_eq!(frames[0].ncols(), 5);
    assert!(frames[0].iter().all(|&s| s == 1 || s == -1));
}

#[test]
fn test_checkpoint_rendering_adds_frames() {
    let mut driver = SweepDriver::with_seed(11)
        .with_renderer(SnapshotRecorder::default(), RenderPolicy::Checkpoints);
    let mut lat = Lattice::new(4, 4);
    let mut params = quick_params(UpdateRule::Metropolis);

    driver.thermalize_lattice(&mut lat, &mut params, 1.0, 2.0, 2);
    assert!(driver.renderer().frames.len() > 2);
}

#[test]
fn test_same_seed_same_results() {
    let run = |seed| {
        let mut driver = SweepDriver::with_seed(seed);
        let mut lat = Lattice::new(6, 6);
        lat.randomize(0.5, driver.rng_mut());
        let mut params = quick_params(UpdateRule::Metropolis);
        driver.thermalize_lattice(&mut lat, &mut params, 2.0, 3.0, 3)
    };

    assert_eq!(run(12), run(12));
}

#[test]
fn test_wolff_vs_metropolis_consistency() {
    // Both moves must sample the same equilibrium distribution
    let temp = 3.0;
    let size = 10;

    let params_metro = Parameters {
        temperature: temp,
        ..quick_params(UpdateRule::Metropolis)
    };
    let params_wolff = Parameters {
        temperature: temp,
        ..quick_params(UpdateRule::Wolff)
    };

    let mean_energy = |params: &Parameters, seed: u64| {
        let mut driver = SweepDriver::with_seed(seed);
        let mut lat = Lattice::new(size, size);
        lat.randomize(0.5, driver.rng_mut());
        let mut state = ChainState::measure(&lat, params);

        for _ in 0..20_000 {
            driver.step(&mut lat, params, &mut state);
        }
        driver
            .sample(&mut lat, params, &mut state, 100_000)
            .finish(temp, 0.0, true)
            .energy
    };

    let metro_mean = mean_energy(&params_metro, 13);
    let wolff_mean = mean_energy(&params_wolff, 14);

    let diff = (metro_mean - wolff_mean).abs();
    assert!(
        diff < 0.1,
        "Energy means too different: Metro={:.4}, Wolff={:.4}, diff={:.4}",
        metro_mean,
        wolff_mean,
        diff
    );
}

#[test]
fn test_chain_sweep() {
    let mut driver = SweepDriver::with_seed(15);
    let mut lat = Lattice::chain(16);
    let mut params = quick_params(UpdateRule::Wolff);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 0.5, 2.0, 3);
    // A 1D chain has at most one bond per site
    assert!(records.iter().all(|p| p.energy >= -1.0 - 1e-9));
}

#[test]
fn test_tracking_on_single_column_lattices() {
    for (w, h) in [(1, 6), (1, 1), (1, 2)] {
        for rule in [UpdateRule::Metropolis, UpdateRule::Wolff] {
            let mut driver = SweepDriver::with_seed(16);
            let mut lat = Lattice::new(w, h);
            lat.randomize(0.5, driver.rng_mut());
            let params = Parameters {
                temperature: 1.5,
                ..quick_params(rule)
            };
            let mut state = ChainState::measure(&lat, &params);

            for _ in 0..2_000 {
                driver.step(&mut lat, &params, &mut state);
            }

            assert_relative_eq!(
                state.energy,
                total_energy(&lat, params.coupling, params.field),
                epsilon = 1e-9
            );
            assert_relative_eq!(state.magnetization, total_magnetization(&lat), epsilon = 1e-12);
        }
    }
}
