//! One-way hooks towards visualization and result storage.
//!
//! Both are fire-and-forget: implementations report their own failures and
//! never influence the simulation.

use nalgebra::DMatrix;

/// Receives snapshots of the spin lattice
pub trait LatticeRenderer {
    /// `grid` has `height` rows and `width` columns of ±1 values
    fn render_lattice(&mut self, grid: &DMatrix<i32>, width: usize, height: usize);
}

/// Persists a named observable series
pub trait SeriesExporter {
    fn export_series(&mut self, values: &[f64], label: &str, destination: &str);
}

/// Renderer for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl LatticeRenderer for NullRenderer {
    fn render_lattice(&mut self, _grid: &DMatrix<i32>, _width: usize, _height: usize) {}
}

/// Keeps every snapshot in memory, mostly useful in tests
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    pub frames: Vec<DMatrix<i32>>,
}

impl LatticeRenderer for SnapshotRecorder {
    fn render_lattice(&mut self, grid: &DMatrix<i32>, _width: usize, _height: usize) {
        self.frames.push(grid.clone());
    }
}
