//! Particle–triangle collision response.
//!
//! Brute force over every (triangle, particle) pair, triangles in the
//! outer loop. A particle whose center is closer than `r` to a triangle
//! is pushed out along `normalize(p - closest)` by the penetration depth
//! and its velocity is mirrored about that direction. The reflection is
//! elastic: no restitution or friction is applied.

use squall_math::Vec3;
use squall_mesh::Triangle;

use crate::response::ContactResult;

/// Mirror `v` about the plane with unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Resolve contacts between particles of `radius` and static triangles.
pub fn resolve_triangle_contacts(
    triangles: &[Triangle],
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    radius: f32,
) -> ContactResult {
    let mut result = ContactResult::default();

    for triangle in triangles {
        for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
            let Some(closest) = triangle.closest_point(*position) else {
                result.skipped_count += 1;
                continue;
            };

            let offset = *position - closest.point;
            let distance = offset.length();
            if !(distance < radius) {
                continue;
            }

            let Some(normal) = offset.try_normalize() else {
                // Center lies on the surface; no side to push towards.
                result.skipped_count += 1;
                continue;
            };

            let depth = radius - distance;
            *position += normal * depth;
            *velocity = reflect(*velocity, normal);
            result.record(depth);
        }
    }

    result
}
