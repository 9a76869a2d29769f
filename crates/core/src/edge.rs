//! Leading-edge extraction from solver snapshots.

use std::path::Path;

use crate::error::{BenchError, BenchResult};
use crate::particle::{Particle, ParticleType};
use crate::snapshot;

/// Maximum fluid `x` in one particle field, the leading edge of the
/// collapsing column.
///
/// # Errors
/// A snapshot with zero fluid records has no defined maximum and yields
/// [`BenchError::EmptySelection`], never a sentinel value.
pub fn leading_edge(particles: &[Particle], origin: &Path) -> BenchResult<f64> {
    particles
        .iter()
        .filter(|p| p.kind == ParticleType::Fluid)
        .map(|p| p.x)
        .max_by(|a, b| a.total_cmp(b))
        .ok_or_else(|| BenchError::EmptySelection {
            path: origin.to_path_buf(),
        })
}

/// Read one snapshot file and extract its leading edge.
pub fn leading_edge_of_snapshot(path: &Path) -> BenchResult<f64> {
    let particles = snapshot::read_snapshot(path)?;
    leading_edge(&particles, path)
}
