//! Benchmark run parameters handed to the document builder.
//!
//! These are explicit parameter objects rather than process-wide state, so
//! several benchmark configurations can be generated concurrently. The
//! defaults are the reference benchmark constants; the key strings are
//! fixed by the solver's configuration reader.

use serde::{Deserialize, Serialize};

/// Solver run controls, serialized as the `condition` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConditions {
    pub start_time: f64,
    pub end_time: f64,
    pub output_interval: f64,
    /// Convergence epsilon of the pressure solve
    pub eps: f64,
}

impl Default for SolverConditions {
    fn default() -> Self {
        SolverConditions {
            start_time: 0.0,
            end_time: 0.5,
            output_interval: 0.005,
            eps: 1e-10,
        }
    }
}

impl SolverConditions {
    /// Ordered key/value pairs, keyed the way the solver reads them
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("startTime", self.start_time),
            ("endTime", self.end_time),
            ("outputInterval", self.output_interval),
            ("eps", self.eps),
        ]
    }
}

/// Physical and numerical constants, serialized as the `environment`
/// section. The document builder appends the four bounding-box values
/// after these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Reference particle spacing
    pub l_0: f64,
    pub min_step_count_per_output: f64,
    /// Courant number
    pub courant: f64,
    /// Gravitational acceleration
    pub g: f64,
    /// Fluid density
    pub rho: f64,
    /// Kinematic viscosity
    pub nu: f64,
    /// Influence radius as a ratio of the spacing
    pub r_e_by_l_0: f64,
    /// Free-surface detection ratio
    pub surface_ratio: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            l_0: 1e-3,
            min_step_count_per_output: 10.0,
            courant: 0.1,
            g: 9.8,
            rho: 998.20,
            nu: 1.004e-6,
            r_e_by_l_0: 2.4,
            surface_ratio: 0.95,
        }
    }
}

impl Environment {
    /// Ordered key/value pairs, keyed the way the solver reads them
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("l_0", self.l_0),
            ("minStepCountPerOutput", self.min_step_count_per_output),
            ("courant", self.courant),
            ("g", self.g),
            ("rho", self.rho),
            ("nu", self.nu),
            ("r_eByl_0", self.r_e_by_l_0),
            ("surfaceRatio", self.surface_ratio),
        ]
    }
}
