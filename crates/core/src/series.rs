//! Parallel aggregation of per-snapshot edges into a time series.
//!
//! One-shot offline batch: every snapshot in a directory is reduced to one
//! scalar on a worker pool sized to the available execution units. Workers
//! share no mutable state and may complete in any order; results are
//! collected back at their submission index because the series index
//! doubles as the implicit time axis. Any single failure aborts the whole
//! run, since a missing timestep would silently shift every later index.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::info;

use crate::edge::leading_edge_of_snapshot;
use crate::error::{BenchError, BenchResult};

/// Leading-edge scalar per snapshot, uniformly spaced by `dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSeries {
    dt: f64,
    edges: Vec<f64>,
}

impl EdgeSeries {
    pub fn new(dt: f64, edges: Vec<f64>) -> BenchResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(BenchError::Configuration(format!(
                "timestep must be positive, got {dt}"
            )));
        }
        Ok(EdgeSeries { dt, edges })
    }

    /// Extract the edge of every snapshot in `dir`, in filename-sorted
    /// order.
    ///
    /// File names are assumed lexicographically chronological. The listing
    /// is not filtered by name pattern, so any non-snapshot file in the
    /// directory aborts the run.
    pub fn from_directory(dir: &Path, dt: f64) -> BenchResult<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| BenchError::io(dir, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(|e| BenchError::io(dir, e))?;
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        info!(snapshots = paths.len(), "aggregating leading edges");

        // Each worker reads exactly one file and returns one scalar; the
        // indexed collect puts every result back at its submission slot,
        // so completion order never reorders the series, and the first
        // failure aborts the collection.
        let edges = paths
            .par_iter()
            .map(|path| leading_edge_of_snapshot(path))
            .collect::<BenchResult<Vec<f64>>>()
            .map_err(|source| BenchError::Aggregation {
                source: Box::new(source),
            })?;

        Self::new(dt, edges)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Koshizuka-Oka scaling: `t* = n dt sqrt(2g/L)`, `z* = z/L`, enabling
    /// direct overlay against the literature curves.
    pub fn non_dimensionalize(&self, l: f64, g: f64) -> BenchResult<Vec<(f64, f64)>> {
        if !l.is_finite() || l <= 0.0 {
            return Err(BenchError::Configuration(format!(
                "characteristic length must be positive, got {l}"
            )));
        }
        if !g.is_finite() || g <= 0.0 {
            return Err(BenchError::Configuration(format!(
                "gravitational acceleration must be positive, got {g}"
            )));
        }
        let tt = (2.0 * g / l).sqrt();
        Ok(self
            .edges
            .iter()
            .enumerate()
            .map(|(n, &edge)| (n as f64 * self.dt * tt, edge / l))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_validated() {
        assert!(EdgeSeries::new(0.0, vec![]).is_err());
        assert!(EdgeSeries::new(-0.01, vec![]).is_err());
        assert!(EdgeSeries::new(f64::NAN, vec![]).is_err());
        assert!(EdgeSeries::new(0.01, vec![1.0]).is_ok());
    }

    #[test]
    fn test_non_dimensional_time_axis() {
        let series = EdgeSeries::new(0.01, vec![1.0, 1.2, 1.5, 2.0]).unwrap();
        let points = series.non_dimensionalize(1.0, 9.8).unwrap();
        let tt = (2.0_f64 * 9.8).sqrt();
        for (n, (t, _)) in points.iter().enumerate() {
            assert!((t - n as f64 * 0.01 * tt).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_dimensional_edge_scaling() {
        let series = EdgeSeries::new(0.1, vec![0.292, 0.438]).unwrap();
        let points = series.non_dimensionalize(0.146, 9.8).unwrap();
        assert!((points[0].1 - 2.0).abs() < 1e-9);
        assert!((points[1].1 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_parameters_validated() {
        let series = EdgeSeries::new(0.01, vec![1.0]).unwrap();
        assert!(series.non_dimensionalize(0.0, 9.8).is_err());
        assert!(series.non_dimensionalize(1.0, 0.0).is_err());
        assert!(series.non_dimensionalize(-1.0, 9.8).is_err());
    }
}
