//! Benchmark scenarios — config, particles and obstacle for each test case.
//!
//! Three canonical scenarios:
//! 1. **Wind tunnel** — particles blown downstream onto a sphere
//! 2. **Head-on** — two particles collide along the X axis
//! 3. **Settle** — particles fall onto a floor grid in still air

use serde::{Deserialize, Serialize};

use squall_math::{Mat4, Vec3};
use squall_mesh::generators::{quad_grid, uv_sphere};
use squall_mesh::{prepare, Triangle, TriangleMesh};
use squall_solver::{ParticleStore, Simulation, SimulationConfig};
use squall_types::{SquallError, SquallResult};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Particles blown onto a sphere by a steady wind.
    WindTunnel,
    /// Two particles on a collision course.
    HeadOn,
    /// Particles settling on a floor under gravity.
    Settle,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::WindTunnel,
            ScenarioKind::HeadOn,
            ScenarioKind::Settle,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::WindTunnel => "wind_tunnel",
            ScenarioKind::HeadOn => "head_on",
            ScenarioKind::Settle => "settle",
        }
    }

    /// Looks a kind up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> SquallResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                SquallError::InvalidConfig(format!(
                    "Unknown scenario '{name}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: SimulationConfig,
    /// Explicit initial particles. Spawned from `config` when `None`.
    pub particles: Option<ParticleStore>,
    /// Optional obstacle mesh in object space.
    pub obstacle: Option<TriangleMesh>,
    /// Object-to-world transform of the obstacle.
    pub obstacle_transform: Mat4,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
}

impl Scenario {
    /// Create the wind tunnel scenario.
    ///
    /// 200 particles spawned in a 6m cube drift downstream in a 4 m/s wind
    /// onto a welded UV sphere of radius 2m centered 7m downstream.
    pub fn wind_tunnel() -> Self {
        Self {
            kind: ScenarioKind::WindTunnel,
            config: SimulationConfig {
                particle_count: 200,
                spawn_extent: 3.0,
                seed: Some(1),
                ..SimulationConfig::wind_tunnel()
            },
            particles: None,
            obstacle: Some(uv_sphere(2.0, 12, 24)),
            obstacle_transform: Mat4::from_translation(Vec3::new(7.0, 0.0, 0.0)),
            timesteps: 240, // 4 seconds at 60fps
            dt: 1.0 / 60.0,
        }
    }

    /// Create the head-on scenario.
    ///
    /// Two particles of radius 0.6 start 2m apart and approach at 1 m/s
    /// each, in vacuum and without gravity.
    pub fn head_on() -> Self {
        let config = SimulationConfig {
            particle_count: 2,
            particle_radius: 0.6,
            air_density: 0.0,
            gravity_scale: 0.0,
            velocity_damping: 1.0,
            seed: Some(0),
            ..SimulationConfig::calm()
        };
        let mut particles = ParticleStore {
            radius: config.particle_radius,
            mass: config.particle_mass,
            ..Default::default()
        };
        particles.push(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        particles.push(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));

        Self {
            kind: ScenarioKind::HeadOn,
            config,
            particles: Some(particles),
            obstacle: None,
            obstacle_transform: Mat4::IDENTITY,
            timesteps: 30,
            dt: 0.1,
        }
    }

    /// Create the settle scenario.
    ///
    /// 150 particles fall in still air onto a 6m × 6m floor grid 2m below
    /// the origin, inside an 8m box.
    pub fn settle() -> Self {
        Self {
            kind: ScenarioKind::Settle,
            config: SimulationConfig {
                particle_count: 150,
                particle_mass: 0.05,
                spawn_extent: 2.5,
                gravity_scale: 2.0,
                volume_size: [8.0, 8.0, 8.0],
                seed: Some(2),
                ..SimulationConfig::calm()
            },
            particles: None,
            obstacle: Some(quad_grid(6, 6, 6.0, 6.0)),
            obstacle_transform: Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0)),
            timesteps: 300, // 5 seconds at 60fps
            dt: 1.0 / 60.0,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::WindTunnel => Self::wind_tunnel(),
            ScenarioKind::HeadOn => Self::head_on(),
            ScenarioKind::Settle => Self::settle(),
        }
    }

    /// Welds the obstacle and places it in world space.
    pub fn world_triangles(&self) -> SquallResult<Vec<Triangle>> {
        match &self.obstacle {
            Some(mesh) => {
                let prepared = prepare(mesh, self.config.weld_threshold)?;
                Ok(prepared.world_triangles(&self.obstacle_transform))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Builds a ready-to-step simulation.
    pub fn build(&self) -> SquallResult<Simulation> {
        let triangles = self.world_triangles()?;
        match &self.particles {
            Some(particles) => {
                Simulation::with_particles(self.config.clone(), particles.clone(), triangles)
            }
            None => Simulation::new(self.config.clone(), triangles),
        }
    }
}
