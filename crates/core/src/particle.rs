//! Particle schema: the one data model both pipelines share.

use serde::{Deserialize, Serialize};

/// Particle classification. The numeric codes are solver-contract
/// constants, so the enumeration is closed with no open extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleType {
    /// Incompressible Newtonian fluid
    Fluid,
    /// Wall surface layer
    Wall,
    /// Boundary-padding particle, kept to stabilize near-wall density
    /// estimates and never advanced dynamically
    Dummy,
}

impl ParticleType {
    /// Numeric code used in snapshot and configuration files
    pub fn code(self) -> u8 {
        match self {
            ParticleType::Fluid => 0,
            ParticleType::Wall => 1,
            ParticleType::Dummy => 2,
        }
    }

    /// Decode a solver type code. Unknown codes must be rejected by the
    /// caller.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ParticleType::Fluid),
            1 => Some(ParticleType::Wall),
            2 => Some(ParticleType::Dummy),
            _ => None,
        }
    }
}

/// One row of simulation state. Never mutated after it is appended to a
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleType,
    /// Position, spacing-normalized
    pub x: f64,
    pub z: f64,
    /// Velocity components
    pub u: f64,
    pub w: f64,
    /// Pressure
    pub p: f64,
    /// Solver-internal neighbor density
    pub n: f64,
}

impl Particle {
    /// A particle at rest: zero velocity, pressure and neighbor density
    pub fn at_rest(kind: ParticleType, x: f64, z: f64) -> Self {
        Particle {
            kind,
            x,
            z,
            u: 0.0,
            w: 0.0,
            p: 0.0,
            n: 0.0,
        }
    }
}

/// Running axis-aligned extrema over all positions seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_z: f64,
}

impl BoundingBox {
    /// Sentinel box: the first included position updates all four bounds
    /// regardless of sign.
    pub fn new() -> Self {
        BoundingBox {
            min_x: f64::INFINITY,
            min_z: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Fold one position into the box. Each axis is folded independently;
    /// the box is not assumed axis-correlated.
    pub fn include(&mut self, x: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.min_z = self.min_z.min(z);
        self.max_x = self.max_x.max(x);
        self.max_z = self.max_z.max(z);
    }

    pub fn contains(&self, x: f64, z: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_z <= z && z <= self.max_z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-ordered sequence of particle records plus the running
/// bounding box over their positions. Records are never deduplicated or
/// merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: BoundingBox,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record and fold its position into the bounds
    pub fn push(&mut self, particle: Particle) {
        self.bounds.include(particle.x, particle.z);
        self.particles.push(particle);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_round_trip() {
        for kind in [ParticleType::Fluid, ParticleType::Wall, ParticleType::Dummy] {
            assert_eq!(ParticleType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ParticleType::from_code(3), None);
        assert_eq!(ParticleType::from_code(255), None);
    }

    #[test]
    fn test_first_include_sets_all_bounds() {
        // Sentinel init must work even when every coordinate is negative
        let mut bounds = BoundingBox::new();
        bounds.include(-2.0, -3.0);
        assert_eq!(bounds.min_x, -2.0);
        assert_eq!(bounds.max_x, -2.0);
        assert_eq!(bounds.min_z, -3.0);
        assert_eq!(bounds.max_z, -3.0);
    }

    #[test]
    fn test_bounds_fold_axes_independently() {
        let mut bounds = BoundingBox::new();
        bounds.include(1.0, -5.0);
        bounds.include(-4.0, 2.0);
        assert_eq!(bounds.min_x, -4.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.min_z, -5.0);
        assert_eq!(bounds.max_z, 2.0);
    }

    #[test]
    fn test_field_push_updates_bounds() {
        let mut field = ParticleField::new();
        field.push(Particle::at_rest(ParticleType::Fluid, 0.5, 1.5));
        field.push(Particle::at_rest(ParticleType::Wall, -1.0, 0.0));
        assert_eq!(field.len(), 2);
        let bounds = field.bounds();
        for particle in field.iter() {
            assert!(bounds.contains(particle.x, particle.z));
        }
    }
}
