//! Aerodynamic and gravity integration.
//!
//! Each particle sees the wind through its relative velocity
//! `v_rel = v - wind`. With dynamic pressure `q = ½ ρ |v_rel|²` and
//! cross-section `A = π r²`:
//!
//! ```text
//! drag = -q · C_d · A · normalize(v_rel)
//! lift =  q · C_l · A · normalize(normalize(v_rel) × up)
//! ```
//!
//! Integration is explicit and split in two updates per step, each
//! advancing the position:
//!
//! ```text
//! v = v · damping + F/m · dt ;  x += v · dt
//! v = v + g · dt             ;  x += v · dt
//! ```

use std::f32::consts::PI;

use squall_math::Vec3;

use crate::config::SimulationConfig;

/// Aerodynamic environment shared by all particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroModel {
    pub wind: Vec3,
    pub air_density: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    /// Reference axis for the lift direction.
    pub up: Vec3,
    pub damping: f32,
    /// Gravity direction times scale.
    pub gravity: Vec3,
}

impl AeroModel {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            wind: config.wind_vec(),
            air_density: config.air_density,
            drag_coefficient: config.drag_coefficient,
            lift_coefficient: config.lift_coefficient,
            up: config.up_vec(),
            damping: config.velocity_damping,
            gravity: config.gravity_vec(),
        }
    }

    /// Drag plus lift on a sphere of `radius` moving at `velocity`.
    ///
    /// Zero when the particle moves with the wind. Lift vanishes when the
    /// relative velocity is parallel to `up`.
    pub fn force(&self, velocity: Vec3, radius: f32) -> Vec3 {
        let relative = velocity - self.wind;
        let Some(direction) = relative.try_normalize() else {
            return Vec3::ZERO;
        };

        let area = PI * radius * radius;
        let q = 0.5 * self.air_density * relative.length_squared() * area;

        let drag = -q * self.drag_coefficient * direction;
        let lift = q * self.lift_coefficient * direction.cross(self.up).normalize_or_zero();
        drag + lift
    }

    /// Force update: damp, accelerate, advance.
    pub fn integrate_forces(
        &self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        radius: f32,
        mass: f32,
        dt: f32,
    ) {
        let force = self.force(*velocity, radius);
        *velocity = *velocity * self.damping + force / mass * dt;
        *position += *velocity * dt;
    }

    /// Gravity update: accelerate, advance.
    pub fn integrate_gravity(&self, position: &mut Vec3, velocity: &mut Vec3, dt: f32) {
        *velocity += self.gravity * dt;
        *position += *velocity * dt;
    }

    /// Both updates in order. Returns `false` and leaves the state
    /// untouched if the result would not be finite.
    pub fn integrate(
        &self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        radius: f32,
        mass: f32,
        dt: f32,
    ) -> bool {
        let (mut p, mut v) = (*position, *velocity);
        self.integrate_forces(&mut p, &mut v, radius, mass, dt);
        self.integrate_gravity(&mut p, &mut v, dt);
        if !(p.is_finite() && v.is_finite()) {
            return false;
        }
        *position = p;
        *velocity = v;
        true
    }
}
