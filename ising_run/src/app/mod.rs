mod report;
mod runner;

use self::report::report_sweep_summary;
use self::runner::run_sweep;
use crate::config::{Args, Config};
use crate::io::{setup_output, DelimitedExporter};
use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use ising::observables::series;
use ising::{SeriesExporter, UpdateRule};
use std::fs;
use tracing::info;

pub struct IsingApplication {
    args: Args,
    config: Config,
}

impl IsingApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        let config = apply_overrides(config, &args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref(), self.args.verbose);
        info!("Configuration read from: {}", self.args.config_file);

        self.config.validate().map_err(|e| eyre!(e))?;

        let results_dir = self.config.results_dir();
        fs::create_dir_all(&results_dir)
            .wrap_err_with(|| format!("Unable to create results directory: {}", results_dir))?;

        let run = run_sweep(&self.config);
        report_sweep_summary(&run.records, &run.parameters, run.lattice.size_xy());

        let mut exporter = DelimitedExporter::new(self.config.delimiter());
        let columns = series(&run.records);
        for (label, values) in &columns {
            exporter.export_series(values, label, &results_dir);
        }
        exporter.export_table(&sweep_table(&columns), "sweep", &results_dir);
        info!(
            "Exported {} series to {}",
            exporter.written().len(),
            results_dir
        );

        Ok(())
    }
}

/// One row per sweep point, columns in export order
fn sweep_table(columns: &[(&'static str, Vec<f64>)]) -> Vec<Vec<f64>> {
    let points = columns.first().map_or(0, |(_, values)| values.len());
    (0..points)
        .map(|i| columns.iter().map(|(_, values)| values[i]).collect())
        .collect()
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}

/// Command-line values take precedence over the configuration file
fn apply_overrides(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(name) = args.algorithm.as_deref() {
        let rule = UpdateRule::try_from(name).map_err(|e| eyre!(e))?;
        config.simulation.algorithm = Some(rule);
    }
    if let Some(points) = args.points {
        config.sweep.points = points;
    }

    let output = config.output.get_or_insert_with(Default::default);
    if let Some(dir) = args.results_dir.clone() {
        output.directory = Some(dir);
    }
    if args.render {
        output.render_lattice = Some(true);
    }

    Ok(config)
}
