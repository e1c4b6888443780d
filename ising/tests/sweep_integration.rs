//! End-to-end sweeps through the public API

use ising::model::{total_energy, total_magnetization};
use ising::observables::series;
use ising::{Lattice, Parameters, SeriesExporter, SweepDriver, UpdateRule};
use std::collections::HashMap;

/// Collects exported series in memory
#[derive(Default)]
struct MemoryExporter {
    written: HashMap<String, Vec<f64>>,
}

impl SeriesExporter for MemoryExporter {
    fn export_series(&mut self, values: &[f64], label: &str, destination: &str) {
        self.written
            .insert(format!("{destination}/{label}"), values.to_vec());
    }
}

fn params(rule: UpdateRule) -> Parameters {
    Parameters {
        epoch_threshold: 5_000,
        jump_size: 200,
        relative_variation: 0.02,
        data_record_duration: 2.0,
        update_rule: rule,
        ..Parameters::default()
    }
}

#[test]
fn test_ordered_4x4_reference_values() {
    let lat = Lattice::new(4, 4);
    assert_eq!(total_energy(&lat, 1.0, 0.0), -32.0);
    assert_eq!(total_magnetization(&lat), 1.0);
}

#[test]
fn test_temperature_sweep_exports_every_column() {
    let mut driver = SweepDriver::with_seed(2718);
    let mut lat = Lattice::new(8, 8);
    let mut params = params(UpdateRule::Wolff);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 1.0, 4.0, 4);
    assert_eq!(records.len(), 4);

    let mut exporter = MemoryExporter::default();
    for (label, values) in series(&records) {
        exporter.export_series(&values, label, "results");
    }

    assert_eq!(exporter.written.len(), 8);
    assert_eq!(exporter.written["results/T"], vec![1.0, 2.0, 3.0, 4.0]);
    assert!(exporter.written["results/M_abs"].iter().all(|&m| m >= 0.0));

    // Ordered phase at T=1, disordered at T=4
    assert!(records[0].magnetization_abs > records[3].magnetization_abs);
    assert!(records[0].energy < records[3].energy);
}

#[test]
fn test_specific_heat_peaks_near_critical_point() {
    let mut driver = SweepDriver::with_seed(31415);
    let mut lat = Lattice::new(12, 12);
    let mut params = params(UpdateRule::Wolff);

    let records = driver.thermalize_lattice(&mut lat, &mut params, 1.0, 5.0, 3);
    let n = lat.size_xy();
    let heat: Vec<f64> = records.iter().map(|p| p.specific_heat(n, params.k_b)).collect();

    assert!(heat.iter().all(|c| c.is_finite() && *c >= 0.0));
    // T = 3 is far closer to T_c than T = 1
    assert!(heat[1] > heat[0]);
}
