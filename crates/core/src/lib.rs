//! Dam-break benchmark toolkit for an OpenMPS-style particle solver.
//!
//! Two independent pipelines share one particle schema:
//! - the field generator lays out the initial condition (fluid block,
//!   wall ring, dummy padding) and serializes it into one configuration
//!   document for the solver;
//! - the analyzer extracts the leading edge of the collapsing column from
//!   every solver snapshot, aggregates the edges in parallel, and overlays
//!   the non-dimensionalized series against literature curves.

pub mod document;
pub mod edge;
pub mod error;
pub mod generator;
pub mod params;
pub mod particle;
pub mod plot;
pub mod series;
pub mod snapshot;

// Re-export the types both binaries work with
pub use document::{read_document, write_document, Document};
pub use edge::{leading_edge, leading_edge_of_snapshot};
pub use error::{BenchError, BenchResult};
pub use generator::{generate_field, FieldParams};
pub use params::{Environment, SolverConditions};
pub use particle::{BoundingBox, Particle, ParticleField, ParticleType};
pub use plot::{load_reference_curves, Curve, CurveStyle, EdgePlot};
pub use series::EdgeSeries;
