//! Hamiltonian and magnetization of a [`Lattice`], plus the O(1) single-flip
//! deltas every Monte Carlo step relies on.
//!
//! H = -J Σ s_i (s_right + s_down) - h Σ s_i
//!
//! Each bond is counted once by only looking at the right and down neighbor of
//! every site.

use crate::lattice::Lattice;

/// Total energy of the lattice for coupling `j` and external field `h`
pub fn total_energy(lat: &Lattice, j: f64, h: f64) -> f64 {
    let mut energy = 0.0;

    for site in lat.sites() {
        let (x, y) = (site.x as isize, site.y as isize);
        let spin = lat.spin(site) as f64;
        let right = lat.neighbor(x, y, 1, 0) as f64;
        let down = lat.neighbor(x, y, 0, 1) as f64;

        energy -= j * spin * (right + down);
        energy -= h * spin;
    }

    energy
}

/// Mean spin value over all sites, in [-1, 1]
pub fn total_magnetization(lat: &Lattice) -> f64 {
    let sum: i64 = lat.spins().iter().map(|&s| s as i64).sum();
    sum as f64 / lat.size_xy()
}

/// Sum of the 4 periodic neighbors of `(x, y)`; degenerate axes add nothing
#[inline]
pub fn neighbor_sum(lat: &Lattice, x: isize, y: isize) -> f64 {
    (lat.neighbor(x, y, 1, 0)
        + lat.neighbor(x, y, -1, 0)
        + lat.neighbor(x, y, 0, 1)
        + lat.neighbor(x, y, 0, -1)) as f64
}

/// Energy change caused by flipping the spin at `(x, y)`.
///
/// ΔE = 2 J s_i Σ neighbors + 2 h s_i
#[inline]
pub fn flip_delta_energy(lat: &Lattice, x: isize, y: isize, j: f64, h: f64) -> f64 {
    let spin = lat.spin_at(x, y) as f64;
    2.0 * (j * spin * neighbor_sum(lat, x, y) + h * spin)
}

/// Magnetization change caused by flipping the spin at `(x, y)`: -2 s_i / N
#[inline]
pub fn flip_delta_magnetization(lat: &Lattice, x: isize, y: isize) -> f64 {
    -2.0 * lat.spin_at(x, y) as f64 / lat.size_xy()
}
