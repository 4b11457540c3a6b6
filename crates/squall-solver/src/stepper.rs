//! The simulation stepper.
//!
//! Each call to [`Simulation::step`] runs five phases in a fixed order:
//!
//! ```text
//! 1. integrate   aero forces, then gravity (per particle)
//! 2. boundary    clamp into the bounding volume
//! 3. pairs       particle–particle, neighbors from the previous rebuild
//! 4. triangles   particle–triangle against static geometry
//! 5. rebuild     neighbor index from the new positions
//! ```
//!
//! Phase 3 deliberately reads the index built at the end of the previous
//! step (or at construction). Two particles that first overlap during this
//! step's integration are only paired if their old cells were already
//! adjacent; otherwise they meet on the next step.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use squall_contact::{
    resolve_particle_pairs, resolve_triangle_contacts, BoundingVolume, BroadPhase, ContactResult,
    SpatialHash,
};
use squall_mesh::Triangle;
use squall_types::{Scalar, SquallError, SquallResult, TriangleId};

use crate::config::SimulationConfig;
use crate::forces::AeroModel;
use crate::spawn::{spawn_particles, SpawnOutcome};
use crate::state::ParticleStore;

/// Statistics for one simulation step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Zero-based index of the step.
    pub step: u64,
    /// Simulation time at the end of the step.
    pub sim_time: f64,
    /// Particles that hit a wall.
    pub boundary_hits: u32,
    /// Particle–particle contacts.
    pub pairs: ContactResult,
    /// Particle–triangle contacts.
    pub triangles: ContactResult,
    /// Particles whose integration produced a non-finite state and were
    /// left as they were.
    pub integration_skips: u32,
    /// Wall-clock time of the step in seconds.
    pub wall_time: f64,
}

/// A running particle simulation.
pub struct Simulation {
    config: SimulationConfig,
    particles: ParticleStore,
    triangles: Vec<Triangle>,
    dropped_triangles: Vec<TriangleId>,
    broad: Box<dyn BroadPhase>,
    volume: BoundingVolume,
    aero: AeroModel,
    spawn: Option<SpawnOutcome>,
    step_count: u64,
    sim_time: f64,
}

impl Simulation {
    /// Spawns particles from `config` and prepares the simulation.
    ///
    /// Fails if the config is invalid or no particle could be placed.
    /// A partial spawn is logged and available through [`spawn_outcome`](Self::spawn_outcome).
    pub fn new(config: SimulationConfig, triangles: Vec<Triangle>) -> SquallResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (particles, outcome) = spawn_particles(&config, &mut rng)?;
        if outcome.placed == 0 {
            return Err(SquallError::InvalidConfig(format!(
                "No particle could be placed in a spawn cube of half-extent {}",
                config.spawn_extent
            )));
        }

        let mut sim = Self::assemble(config, particles, triangles)?;
        sim.spawn = Some(outcome);
        Ok(sim)
    }

    /// Prepares a simulation over an explicit particle store.
    ///
    /// The store must be non-empty, fit `config.particle_count`, and share
    /// the configured radius and mass.
    pub fn with_particles(
        config: SimulationConfig,
        particles: ParticleStore,
        triangles: Vec<Triangle>,
    ) -> SquallResult<Self> {
        config.validate()?;
        particles.validate()?;
        if particles.is_empty() {
            return Err(SquallError::InvalidConfig(
                "Simulation needs at least one particle".into(),
            ));
        }
        if particles.len() > config.particle_count {
            return Err(SquallError::CapacityExceeded {
                requested: particles.len(),
                capacity: config.particle_count,
            });
        }
        if particles.radius != config.particle_radius || particles.mass != config.particle_mass {
            return Err(SquallError::InvalidConfig(format!(
                "Particle store (r={}, m={}) does not match config (r={}, m={})",
                particles.radius, particles.mass, config.particle_radius, config.particle_mass
            )));
        }
        Self::assemble(config, particles, triangles)
    }

    fn assemble(
        config: SimulationConfig,
        particles: ParticleStore,
        triangles: Vec<Triangle>,
    ) -> SquallResult<Self> {
        let mut kept = Vec::with_capacity(triangles.len());
        let mut dropped_triangles = Vec::new();
        for (index, triangle) in triangles.into_iter().enumerate() {
            if triangle.is_degenerate() {
                let id = TriangleId(index as u32);
                tracing::warn!(
                    triangle = %id,
                    area = triangle.area(),
                    "skipping degenerate collision triangle"
                );
                dropped_triangles.push(id);
            } else {
                kept.push(triangle);
            }
        }
        let triangles = kept;

        let mut broad: Box<dyn BroadPhase> =
            Box::new(SpatialHash::new(config.cell_spacing(), config.particle_count)?);
        broad.rebuild(&particles.positions)?;

        tracing::info!(
            particles = particles.len(),
            triangles = triangles.len(),
            cell_spacing = config.cell_spacing(),
            "simulation ready"
        );

        Ok(Self {
            volume: BoundingVolume::new(
                config.volume_vec(),
                config.boundary_damping,
                config.boundary_epsilon,
            ),
            aero: AeroModel::from_config(&config),
            config,
            particles,
            triangles,
            dropped_triangles,
            broad,
            spawn: None,
            step_count: 0,
            sim_time: 0.0,
        })
    }

    /// Replaces the neighbor index and rebuilds it from current positions.
    pub fn with_broad_phase(mut self, mut broad: Box<dyn BroadPhase>) -> SquallResult<Self> {
        broad.rebuild(&self.particles.positions)?;
        tracing::debug!(broad_phase = broad.name(), "neighbor index replaced");
        self.broad = broad;
        Ok(self)
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `dt` and the index capacity are checked before any state changes.
    pub fn step(&mut self, dt: Scalar) -> SquallResult<StepReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SquallError::InvalidConfig(format!(
                "Timestep must be positive and finite, got {dt}"
            )));
        }
        self.particles.validate()?;
        if self.particles.len() > self.broad.capacity() {
            return Err(SquallError::CapacityExceeded {
                requested: self.particles.len(),
                capacity: self.broad.capacity(),
            });
        }

        let start = Instant::now();
        let radius = self.particles.radius;
        let mass = self.particles.mass;
        let ParticleStore {
            positions,
            velocities,
            ..
        } = &mut self.particles;

        // 1. Integrate
        let mut integration_skips = 0;
        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            if !self.aero.integrate(p, v, radius, mass, dt) {
                integration_skips += 1;
            }
        }
        if integration_skips > 0 {
            tracing::warn!(
                step = self.step_count,
                count = integration_skips,
                "non-finite integration result, particles kept at previous state"
            );
        }

        // 2. Boundary
        let boundary = self.volume.contain(positions, velocities);

        // 3. Pairs, against the previous step's index
        let pairs = resolve_particle_pairs(
            self.broad.as_mut(),
            positions,
            velocities,
            radius,
            self.config.restitution,
        );

        // 4. Triangles
        let triangles = resolve_triangle_contacts(&self.triangles, positions, velocities, radius);

        // 5. Rebuild
        self.broad.rebuild(positions)?;

        let report = StepReport {
            step: self.step_count,
            sim_time: self.sim_time + dt as f64,
            boundary_hits: boundary.resolved_count,
            pairs,
            triangles,
            integration_skips,
            wall_time: start.elapsed().as_secs_f64(),
        };
        self.step_count += 1;
        self.sim_time = report.sim_time;

        tracing::debug!(
            step = report.step,
            boundary_hits = report.boundary_hits,
            pair_contacts = report.pairs.resolved_count,
            triangle_contacts = report.triangles.resolved_count,
            wall_ms = report.wall_time * 1000.0,
            "step"
        );
        Ok(report)
    }

    /// Advances by the configured timestep.
    pub fn tick(&mut self) -> SquallResult<StepReport> {
        self.step(self.config.dt)
    }

    /// Runs `steps` configured timesteps and returns every report.
    pub fn run(&mut self, steps: usize) -> SquallResult<Vec<StepReport>> {
        (0..steps).map(|_| self.tick()).collect()
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Mutable access between steps, e.g. to nudge particles.
    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.particles
    }

    /// Non-degenerate collision triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Positions in the input list of triangles filtered out as degenerate.
    pub fn dropped_triangles(&self) -> &[TriangleId] {
        &self.dropped_triangles
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn broad_phase(&self) -> &dyn BroadPhase {
        self.broad.as_ref()
    }

    /// Spawn result when the particles were placed by [`Simulation::new`].
    pub fn spawn_outcome(&self) -> Option<SpawnOutcome> {
        self.spawn
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Elapsed simulation time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.kinetic_energy()
    }
}
