//! File-backed result sinks

use ising::{LatticeRenderer, SeriesExporter};
use nalgebra::DMatrix;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes each series to `<destination>/<label>.csv`, one value per line.
///
/// Tables put one record per line with fields joined by the delimiter.
pub struct DelimitedExporter {
    delimiter: String,
    written: Vec<PathBuf>,
}

impl DelimitedExporter {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            written: Vec::new(),
        }
    }

    /// Files successfully written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Write a 2D table to `<destination>/<label>.csv`, one row per line
    pub fn export_table(&mut self, rows: &[Vec<f64>], label: &str, destination: &str) {
        let path = Path::new(destination).join(format!("{}.csv", label));
        let result = self.write_rows(&path, rows.iter().map(Vec::as_slice));
        self.finish(result, path, label, rows.len());
    }

    fn write_rows<'a>(&self, path: &Path, rows: impl Iterator<Item = &'a [f64]>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        for row in rows {
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(&self.delimiter);
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }

    fn finish(&mut self, result: io::Result<()>, path: PathBuf, label: &str, rows: usize) {
        match result {
            Ok(()) => {
                debug!("Wrote {} rows to {}", rows, path.display());
                self.written.push(path);
            }
            Err(err) => warn!("Could not export {} to {}: {}", label, path.display(), err),
        }
    }
}

impl SeriesExporter for DelimitedExporter {
    fn export_series(&mut self, values: &[f64], label: &str, destination: &str) {
        let path = Path::new(destination).join(format!("{}.csv", label));
        let result = self.write_rows(&path, values.chunks(1));
        self.finish(result, path, label, values.len());
    }
}

/// Overwrites `<directory>/lattice.grid` with the latest snapshot, one row of
/// space-separated spins per line
pub struct GridFileRenderer {
    path: PathBuf,
}

impl GridFileRenderer {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            path: directory.as_ref().join("lattice.grid"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_grid(&self, grid: &DMatrix<i32>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for row in grid.row_iter() {
            let line = row
                .iter()
                .map(|s| if *s > 0 { "+1" } else { "-1" })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}

impl LatticeRenderer for GridFileRenderer {
    fn render_lattice(&mut self, grid: &DMatrix<i32>, width: usize, height: usize) {
        debug_assert_eq!(grid.shape(), (height, width));
        if let Err(err) = self.write_grid(grid) {
            warn!("Could not write lattice snapshot to {}: {}", self.path.display(), err);
        }
    }
}
