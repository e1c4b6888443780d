use super::StepDelta;
use crate::lattice::{Lattice, Site};
use crate::params::Parameters;
use rand::Rng;
use std::collections::HashMap;

/// Outcome of one Wolff cluster flip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterFlip {
    pub delta: StepDelta,
    /// Number of sites flipped, always >= 1
    pub size: usize,
    /// Same-spin sites next to the cluster whose every bond test failed
    pub rejected: usize,
    /// Spin of the seed site before the flip
    pub seed_spin: i8,
}

/// Role of a site touched while growing a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    /// Accepted into the cluster (already flipped)
    Cluster,
    /// Same-spin neighbor whose bond test failed at least once
    Rejected,
}

/// One Wolff cluster step.
///
/// Grows a cluster from a random seed with depth-first search: every bond
/// between a cluster member and a same-spin neighbor is activated with
/// probability 1 - exp(-2J / k_B T), and accepted sites are flipped right
/// away. Energy and magnetization deltas come from the cluster boundary and
/// size, so the cost scales with the cluster rather than the lattice.
///
/// # Panics
///
/// The cluster move is only valid without external field; calling it with
/// `params.field != 0` is a contract violation.
pub fn wolff_step<R: Rng + ?Sized>(
    lat: &mut Lattice,
    params: &Parameters,
    rng: &mut R,
) -> ClusterFlip {
    assert!(
        params.field == 0.0,
        "Wolff update requires zero external field, got h = {}",
        params.field
    );

    let seed = Site {
        x: rng.gen_range(0..lat.size_x()),
        y: rng.gen_range(0..lat.size_y()),
    };
    let seed_spin = lat.spin(seed);
    let add_probability = params.bond_probability();

    let mut members: HashMap<Site, Membership> = HashMap::new();
    let mut stack = vec![seed];
    members.insert(seed, Membership::Cluster);
    lat.flip_site(seed);

    while let Some(site) = stack.pop() {
        let neighbors: Vec<Site> = lat.neighbor_sites(site).collect();
        for neighbor in neighbors {
            if members.get(&neighbor) == Some(&Membership::Cluster) {
                continue;
            }
            if lat.spin(neighbor) != seed_spin {
                continue;
            }

            // One independent test per (member, neighbor) bond
            if rng.gen::<f64>() < add_probability {
                members.insert(neighbor, Membership::Cluster);
                lat.flip_site(neighbor);
                stack.push(neighbor);
            } else {
                members.entry(neighbor).or_insert(Membership::Rejected);
            }
        }
    }

    let mut cluster = Vec::with_capacity(members.len());
    let mut rejected = 0;
    for (&site, role) in &members {
        match role {
            Membership::Cluster => cluster.push(site),
            Membership::Rejected => rejected += 1,
        }
    }

    // Spins just outside the cluster, once per boundary edge
    let mut boundary_sum = 0.0;
    for &site in &cluster {
        for neighbor in lat.neighbor_sites(site) {
            if members.get(&neighbor) != Some(&Membership::Cluster) {
                boundary_sum += lat.spin(neighbor) as f64;
            }
        }
    }

    let size = cluster.len();
    let cluster_spin = size as f64 * seed_spin as f64;
    let s0 = seed_spin as f64;

    tracing::trace!(size, rejected, boundary_sum, "wolff cluster flipped");

    ClusterFlip {
        delta: StepDelta {
            energy: 2.0 * params.coupling * s0 * boundary_sum + 2.0 * params.field * cluster_spin,
            magnetization: -2.0 * cluster_spin / lat.size_xy(),
        },
        size,
        rejected,
        seed_spin,
    }
}
