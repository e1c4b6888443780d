use ising::{critical_temperature, Parameters, Properties};
use tracing::{info, warn};

pub fn report_sweep_summary(records: &[Properties], params: &Parameters, n_sites: f64) {
    info!("\nSweep finished: {} points", records.len());
    info!(
        "  {:>9} {:>9} {:>11} {:>9} {:>10} {:>10} {:>10}  eq",
        "T", "h", "E/N", "|M|", "C", "chi", "steps"
    );
    for p in records {
        info!(
            "  {:>9.4} {:>9.4} {:>11.6} {:>9.6} {:>10.5} {:>10.5} {:>10}  {}",
            p.temperature,
            p.field,
            p.energy,
            p.magnetization_abs,
            p.specific_heat(n_sites, params.k_b),
            p.susceptibility(n_sites, params.k_b),
            p.steps,
            if p.equilibrated { "yes" } else { "no" }
        );
    }

    let timed_out = records.iter().filter(|p| !p.equilibrated).count();
    if timed_out > 0 {
        warn!(
            "{} of {} points hit the epoch threshold before equilibrium",
            timed_out,
            records.len()
        );
    }

    if let Some(peak) = records.iter().max_by(|a, b| {
        a.specific_heat(n_sites, params.k_b)
            .total_cmp(&b.specific_heat(n_sites, params.k_b))
    }) {
        info!(
            "\nSpecific heat peaks at T = {:.4} (exact 2D T_c = {:.4} J/k_B)",
            peak.temperature,
            critical_temperature() * params.coupling
        );
    }
}
