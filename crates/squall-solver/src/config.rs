//! Simulation configuration.
//!
//! Every field has a default, so a TOML file only needs to list the
//! values it changes:
//!
//! ```toml
//! particle_count = 250
//! wind = [6.0, 0.0, 0.0]
//! seed = 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use squall_math::Vec3;
use squall_types::constants;
use squall_types::{SquallError, SquallResult};

/// Configuration for a particle simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // ─── Particles ───
    /// Number of particles to spawn. Also the neighbor index capacity.
    pub particle_count: usize,
    /// Radius shared by every particle.
    pub particle_radius: f32,
    /// Mass shared by every particle.
    pub particle_mass: f32,
    /// Half-extent of the cube particles are spawned in.
    pub spawn_extent: f32,
    /// Rejection-sampling budget per particle.
    pub max_spawn_attempts: u32,
    /// RNG seed for spawning. Entropy-seeded when absent.
    pub seed: Option<u64>,

    // ─── Aerodynamics ───
    /// Ambient wind velocity.
    pub wind: [f32; 3],
    pub air_density: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    /// Velocity multiplier applied during force integration.
    pub velocity_damping: f32,
    /// Unit direction of gravity.
    pub gravity_direction: [f32; 3],
    /// Gravity magnitude.
    pub gravity_scale: f32,
    /// Reference axis for lift (`normalize(v_rel) × up`).
    pub up: [f32; 3],

    // ─── Bounds and contacts ───
    /// Extents of the origin-centered bounding box.
    pub volume_size: [f32; 3],
    /// Fraction of normal velocity kept after a wall hit.
    pub boundary_damping: f32,
    /// Clamp distance inside the walls.
    pub boundary_epsilon: f32,
    /// Particle pair restitution (1 elastic, 0 inelastic).
    pub restitution: f32,
    /// Neighbor index cell size. Defaults to the particle diameter.
    pub cell_spacing: Option<f32>,

    // ─── Driver ───
    /// Timestep used by [`Simulation::tick`](crate::Simulation::tick).
    pub dt: f32,
    /// Vertex welding distance for obstacle meshes.
    pub weld_threshold: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            particle_radius: 0.2,
            particle_mass: 0.00125,
            spawn_extent: 5.0,
            max_spawn_attempts: constants::DEFAULT_MAX_SPAWN_ATTEMPTS,
            seed: None,
            wind: [4.0, 0.0, 0.0],
            air_density: constants::AIR_DENSITY,
            drag_coefficient: constants::SPHERE_DRAG_COEFFICIENT,
            lift_coefficient: 1.0,
            velocity_damping: 0.99,
            gravity_direction: [0.0, -1.0, 0.0],
            gravity_scale: 0.1,
            up: [0.0, 1.0, 0.0],
            volume_size: [30.0, 30.0, 30.0],
            boundary_damping: 0.8,
            boundary_epsilon: 0.01,
            restitution: 0.8,
            cell_spacing: None,
            dt: constants::DEFAULT_DT,
            weld_threshold: constants::DEFAULT_WELD_THRESHOLD,
        }
    }
}

fn require(condition: bool, message: impl FnOnce() -> String) -> SquallResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SquallError::InvalidConfig(message()))
    }
}

fn finite3(v: [f32; 3]) -> bool {
    v.iter().all(|c| c.is_finite())
}

impl SimulationConfig {
    /// Still air. Particles only fall and collide.
    pub fn calm() -> Self {
        Self {
            wind: [0.0, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// Heavier particles in a steady breeze. Stable at the default timestep.
    pub fn wind_tunnel() -> Self {
        Self {
            particle_mass: 0.05,
            ..Default::default()
        }
    }

    pub fn wind_vec(&self) -> Vec3 {
        Vec3::from_array(self.wind)
    }

    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity_direction) * self.gravity_scale
    }

    pub fn up_vec(&self) -> Vec3 {
        Vec3::from_array(self.up)
    }

    pub fn volume_vec(&self) -> Vec3 {
        Vec3::from_array(self.volume_size)
    }

    /// Neighbor index cell size, resolving the default of one diameter.
    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing.unwrap_or(2.0 * self.particle_radius)
    }

    /// Checks every field, failing on the first invalid one.
    pub fn validate(&self) -> SquallResult<()> {
        require(self.particle_count > 0, || "particle_count must be at least 1".into())?;
        require(
            u32::try_from(self.particle_count).is_ok(),
            || format!("particle_count {} does not fit particle ids", self.particle_count),
        )?;
        require(self.particle_radius.is_finite() && self.particle_radius > 0.0, || {
            format!("particle_radius must be positive, got {}", self.particle_radius)
        })?;
        require(self.particle_mass.is_finite() && self.particle_mass > 0.0, || {
            format!("particle_mass must be positive, got {}", self.particle_mass)
        })?;
        require(self.spawn_extent.is_finite() && self.spawn_extent > 0.0, || {
            format!("spawn_extent must be positive, got {}", self.spawn_extent)
        })?;
        require(self.max_spawn_attempts > 0, || {
            "max_spawn_attempts must be at least 1".into()
        })?;

        require(finite3(self.wind), || format!("wind must be finite, got {:?}", self.wind))?;
        require(self.air_density.is_finite() && self.air_density >= 0.0, || {
            format!("air_density must be non-negative, got {}", self.air_density)
        })?;
        require(
            self.drag_coefficient.is_finite() && self.drag_coefficient >= 0.0,
            || format!("drag_coefficient must be non-negative, got {}", self.drag_coefficient),
        )?;
        require(self.lift_coefficient.is_finite(), || {
            format!("lift_coefficient must be finite, got {}", self.lift_coefficient)
        })?;
        require((0.0..=1.0).contains(&self.velocity_damping), || {
            format!("velocity_damping must be in [0, 1], got {}", self.velocity_damping)
        })?;
        require(finite3(self.gravity_direction), || {
            format!("gravity_direction must be finite, got {:?}", self.gravity_direction)
        })?;
        require(self.gravity_scale.is_finite(), || {
            format!("gravity_scale must be finite, got {}", self.gravity_scale)
        })?;
        require(
            finite3(self.up) && self.up_vec().length_squared() > constants::NORMALIZE_EPSILON_SQ,
            || format!("up must be a finite non-zero vector, got {:?}", self.up),
        )?;

        require(
            self.volume_size.iter().all(|s| s.is_finite() && *s > 0.0),
            || format!("volume_size must be positive on every axis, got {:?}", self.volume_size),
        )?;
        require((0.0..=1.0).contains(&self.boundary_damping), || {
            format!("boundary_damping must be in [0, 1], got {}", self.boundary_damping)
        })?;
        let min_half = self.volume_size.iter().fold(f32::INFINITY, |m, s| m.min(*s)) * 0.5;
        require(
            self.boundary_epsilon.is_finite()
                && self.boundary_epsilon >= 0.0
                && self.boundary_epsilon < min_half,
            || {
                format!(
                    "boundary_epsilon must be in [0, {min_half}), got {}",
                    self.boundary_epsilon
                )
            },
        )?;
        require((0.0..=1.0).contains(&self.restitution), || {
            format!("restitution must be in [0, 1], got {}", self.restitution)
        })?;
        if let Some(spacing) = self.cell_spacing {
            // Finer cells make every neighbor query walk (4r / spacing)³ cells.
            require(spacing.is_finite() && spacing >= self.particle_radius, || {
                format!(
                    "cell_spacing must be at least particle_radius ({}), got {spacing}",
                    self.particle_radius
                )
            })?;
        }

        require(self.dt.is_finite() && self.dt > 0.0, || {
            format!("dt must be positive, got {}", self.dt)
        })?;
        require(self.weld_threshold.is_finite() && self.weld_threshold >= 0.0, || {
            format!("weld_threshold must be non-negative, got {}", self.weld_threshold)
        })?;
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> SquallResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SquallError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SquallResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> SquallResult<String> {
        toml::to_string_pretty(self).map_err(|e| SquallError::Serialization(e.to_string()))
    }
}
