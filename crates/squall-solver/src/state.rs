//! Particle store — SoA buffers for per-particle state.
//!
//! Radius and mass are shared by every particle. Density and pressure are
//! carried per particle but no stage of the step reads or writes them.
//!
//! # Layout
//!
//! ```text
//! positions:  [p0, p1, p2, ...]
//! velocities: [v0, v1, v2, ...]
//! ```
//!
//! A particle's identity is its index, stable for the lifetime of the
//! store. Particles are never removed.

use squall_math::Vec3;
use squall_types::{ParticleId, SquallError, SquallResult};

use crate::config::SimulationConfig;

/// Per-particle simulation state.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    // ─── Kinematics ───
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,

    // ─── Inert physical fields ───
    pub density: Vec<f32>,
    pub pressure: Vec<f32>,

    // ─── Shared ───
    pub radius: f32,
    pub mass: f32,
}

/// By-value view of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub mass: f32,
    pub density: f32,
    pub pressure: f32,
}

impl ParticleStore {
    /// Creates an empty store. Fails on non-positive radius or mass.
    pub fn new(radius: f32, mass: f32) -> SquallResult<Self> {
        if !(radius.is_finite() && radius > 0.0) || !(mass.is_finite() && mass > 0.0) {
            return Err(SquallError::InvalidConfig(format!(
                "Particle radius and mass must be positive, got r={radius} m={mass}"
            )));
        }
        Ok(Self {
            radius,
            mass,
            ..Default::default()
        })
    }

    /// Empty store sized for `config.particle_count` particles.
    pub fn from_config(config: &SimulationConfig) -> SquallResult<Self> {
        let mut store = Self::new(config.particle_radius, config.particle_mass)?;
        store.reserve(config.particle_count);
        Ok(store)
    }

    /// Store holding particles at rest at `positions`.
    pub fn at_rest(positions: &[Vec3], radius: f32, mass: f32) -> SquallResult<Self> {
        let mut store = Self::new(radius, mass)?;
        store.reserve(positions.len());
        for &p in positions {
            store.push(p, Vec3::ZERO);
        }
        Ok(store)
    }

    pub fn reserve(&mut self, additional: usize) {
        self.positions.reserve(additional);
        self.velocities.reserve(additional);
        self.density.reserve(additional);
        self.pressure.reserve(additional);
    }

    /// Appends a particle and returns its id.
    pub fn push(&mut self, position: Vec3, velocity: Vec3) -> ParticleId {
        let id = ParticleId(self.positions.len() as u32);
        self.positions.push(position);
        self.velocities.push(velocity);
        self.density.push(0.0);
        self.pressure.push(0.0);
        id
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Snapshot of particle `i`, if it exists.
    pub fn particle(&self, i: usize) -> Option<Particle> {
        Some(Particle {
            id: ParticleId(i as u32),
            position: *self.positions.get(i)?,
            velocity: self.velocities[i],
            radius: self.radius,
            mass: self.mass,
            density: self.density[i],
            pressure: self.pressure[i],
        })
    }

    /// Iterates over snapshots of every particle.
    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(move |i| self.particle(i))
    }

    /// Total kinetic energy: `½ m Σ|v|²`.
    pub fn kinetic_energy(&self) -> f64 {
        let sum: f64 = self
            .velocities
            .iter()
            .map(|v| v.length_squared() as f64)
            .sum();
        0.5 * self.mass as f64 * sum
    }

    /// True if every position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite())
            && self.velocities.iter().all(|v| v.is_finite())
    }

    /// Checks that every channel has the same length.
    pub fn validate(&self) -> SquallResult<()> {
        let n = self.positions.len();
        if self.velocities.len() != n || self.density.len() != n || self.pressure.len() != n {
            return Err(SquallError::InvariantViolation(format!(
                "Particle channels out of sync: positions={n} velocities={} density={} pressure={}",
                self.velocities.len(),
                self.density.len(),
                self.pressure.len()
            )));
        }
        Ok(())
    }
}
