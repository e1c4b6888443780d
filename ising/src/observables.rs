use serde::{Deserialize, Serialize};

/// Running sums of the observables over a sampling window.
///
/// Energies are accumulated per site; magnetization is already a per-site
/// quantity.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    energy: f64,
    energy_sq: f64,
    magnetization: f64,
    magnetization_sq: f64,
    magnetization_abs: f64,
    samples: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample of per-site energy and magnetization
    #[inline]
    pub fn push(&mut self, energy_per_site: f64, magnetization: f64) {
        self.energy += energy_per_site;
        self.energy_sq += energy_per_site * energy_per_site;
        self.magnetization += magnetization;
        self.magnetization_sq += magnetization * magnetization;
        self.magnetization_abs += magnetization.abs();
        self.samples += 1;
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Divide every sum by the sample count.
    ///
    /// An empty window is normalized as if it held one sample so that no
    /// division by zero can occur.
    pub fn finish(self, temperature: f64, field: f64, equilibrated: bool) -> Properties {
        let n = self.samples.max(1) as f64;
        Properties {
            temperature,
            field,
            energy: self.energy / n,
            energy_sq: self.energy_sq / n,
            magnetization: self.magnetization / n,
            magnetization_sq: self.magnetization_sq / n,
            magnetization_abs: self.magnetization_abs / n,
            steps: self.samples,
            equilibrated,
        }
    }
}

/// Averaged observables of one sweep point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub temperature: f64,
    pub field: f64,
    /// <e>, energy per site
    pub energy: f64,
    /// <e²>
    pub energy_sq: f64,
    /// <m>
    pub magnetization: f64,
    /// <m²>
    pub magnetization_sq: f64,
    /// <|m|>
    pub magnetization_abs: f64,
    /// Number of Monte Carlo steps sampled for this point
    pub steps: usize,
    /// False when equilibration hit `epoch_threshold`; such points are less reliable
    pub equilibrated: bool,
}

impl Properties {
    /// Specific heat per site: N (<e²> - <e>²) / (k_B T²)
    pub fn specific_heat(&self, n_sites: f64, k_b: f64) -> f64 {
        let variance = (self.energy_sq - self.energy * self.energy).max(0.0);
        n_sites * variance / (k_b * self.temperature * self.temperature)
    }

    /// Magnetic susceptibility per site: N (<m²> - <|m|>²) / (k_B T)
    pub fn susceptibility(&self, n_sites: f64, k_b: f64) -> f64 {
        let variance = (self.magnetization_sq - self.magnetization_abs * self.magnetization_abs).max(0.0);
        n_sites * variance / (k_b * self.temperature)
    }
}

/// Named columns of a sweep, in the order they are exported
pub fn series(records: &[Properties]) -> Vec<(&'static str, Vec<f64>)> {
    let column = |f: fn(&Properties) -> f64| records.iter().map(f).collect::<Vec<f64>>();
    vec![
        ("T", column(|p| p.temperature)),
        ("h", column(|p| p.field)),
        ("E", column(|p| p.energy)),
        ("E_sq", column(|p| p.energy_sq)),
        ("M", column(|p| p.magnetization)),
        ("M_sq", column(|p| p.magnetization_sq)),
        ("M_abs", column(|p| p.magnetization_abs)),
        ("steps", column(|p| p.steps as f64)),
    ]
}

/// Critical temperature of the 2D Ising model (exact result)
/// T_c = 2J / (k_B * ln(1 + √2)) ≈ 2.269 J/k_B
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}
