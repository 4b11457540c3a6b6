//! Axis-aligned bounding volume containment.
//!
//! A box centered at the origin. Particles leaving it on an axis are
//! clamped just inside the face and have that velocity component
//! reversed and damped. This is an inelastic per-axis reflection, not
//! a contact response: the other velocity components are untouched.

use squall_math::Vec3;

use crate::response::ContactResult;

/// Origin-centered simulation box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Half of the box size on each axis.
    pub half_extents: Vec3,
    /// Fraction of the normal velocity kept after a wall hit.
    pub damping: f32,
    /// Distance inside the face a particle is clamped to.
    pub epsilon: f32,
}

impl BoundingVolume {
    /// Creates a box of total extents `size` centered at the origin.
    pub fn new(size: Vec3, damping: f32, epsilon: f32) -> Self {
        Self {
            half_extents: size * 0.5,
            damping,
            epsilon,
        }
    }

    pub fn min(&self) -> Vec3 {
        -self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.half_extents
    }

    /// True if `p` lies inside or on the box.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min()).all() && p.cmple(self.max()).all()
    }

    /// Contain a single particle. Returns how far it was outside on the
    /// worst axis, or `None` if it was inside.
    pub fn contain_particle(&self, position: &mut Vec3, velocity: &mut Vec3) -> Option<f32> {
        let min = self.min();
        let max = self.max();
        let mut overshoot: Option<f32> = None;

        for axis in 0..3 {
            let depth = if position[axis] < min[axis] {
                let depth = min[axis] - position[axis];
                position[axis] = min[axis] + self.epsilon;
                depth
            } else if position[axis] > max[axis] {
                let depth = position[axis] - max[axis];
                position[axis] = max[axis] - self.epsilon;
                depth
            } else {
                continue;
            };
            velocity[axis] *= -self.damping;
            overshoot = Some(overshoot.map_or(depth, |d| d.max(depth)));
        }

        overshoot
    }

    /// Contain every particle. `resolved_count` counts particles that hit a wall.
    pub fn contain(&self, positions: &mut [Vec3], velocities: &mut [Vec3]) -> ContactResult {
        let mut result = ContactResult::default();
        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            if let Some(depth) = self.contain_particle(p, v) {
                result.record(depth);
            }
        }
        result
    }
}
