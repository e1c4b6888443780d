use super::StepDelta;
use crate::lattice::Lattice;
use crate::model::{flip_delta_energy, flip_delta_magnetization};
use crate::params::Parameters;
use rand::Rng;

/// One single-site Metropolis step.
///
/// A uniformly random site is proposed for a flip; moves that lower (or keep)
/// the energy are always accepted, others with probability exp(-ΔE / k_B T).
/// Returns the realized deltas, or zero when the move is rejected.
pub fn metropolis_step<R: Rng + ?Sized>(
    lat: &mut Lattice,
    params: &Parameters,
    rng: &mut R,
) -> StepDelta {
    let x = rng.gen_range(0..lat.size_x()) as isize;
    let y = rng.gen_range(0..lat.size_y()) as isize;

    let delta_e = flip_delta_energy(lat, x, y, params.coupling, params.field);

    // Metropolis acceptance criterion
    if delta_e <= 0.0 || rng.gen::<f64>() < (-delta_e * params.beta()).exp() {
        let delta_m = flip_delta_magnetization(lat, x, y);
        lat.flip(x, y);
        StepDelta {
            energy: delta_e,
            magnetization: delta_m,
        }
    } else {
        StepDelta::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{total_energy, total_magnetization};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tracked_deltas_follow_lattice() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut lat = Lattice::new(8, 8);
        lat.randomize(0.5, &mut rng);
        let params = Parameters {
            temperature: 2.0,
            field: 0.3,
            ..Parameters::default()
        };

        let mut energy = total_energy(&lat, params.coupling, params.field);
        let mut magnetization = total_magnetization(&lat);
        for _ in 0..5_000 {
            let delta = metropolis_step(&mut lat, &params, &mut rng);
            energy += delta.energy;
            magnetization += delta.magnetization;
        }

        assert_relative_eq!(
            energy,
            total_energy(&lat, params.coupling, params.field),
            epsilon = 1e-8
        );
        assert_relative_eq!(magnetization, total_magnetization(&lat), epsilon = 1e-10);
    }

    #[test]
    fn test_low_temperature_rejects_uphill_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut lat = Lattice::new(6, 6);
        let params = Parameters {
            temperature: 1e-3,
            ..Parameters::default()
        };

        // Every flip out of the ground state costs 8J, effectively never accepted
        for _ in 0..1_000 {
            assert_eq!(metropolis_step(&mut lat, &params, &mut rng), StepDelta::ZERO);
        }
        assert_relative_eq!(total_magnetization(&lat), 1.0);
    }

    #[test]
    fn test_downhill_move_always_accepted() {
        let mut rng = StdRng::seed_from_u64(11);
        // Two-site chain with opposite spins: either flip lowers E
        let mut lat = Lattice::chain(2);
        lat.set_spin(1, 0, -1);
        let params = Parameters {
            temperature: 1e-3,
            ..Parameters::default()
        };

        let delta = metropolis_step(&mut lat, &params, &mut rng);
        assert_relative_eq!(delta.energy, -4.0);
        assert_eq!(lat.spin_at(0, 0), lat.spin_at(1, 0));
    }
}
